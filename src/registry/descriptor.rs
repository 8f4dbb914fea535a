//! Application descriptor parsing

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    /// File could not be read at all
    #[error("cannot read descriptor: {0}")]
    Unreadable(#[from] std::io::Error),
    /// Malformed content; the whole file is skipped
    #[error("line {line}: not a key=value pair")]
    Parse { line: usize },
    /// Structurally fine but missing a required field; excluded from the registry
    #[error("missing required field `{0}`")]
    Invalid(&'static str),
}

/// Metadata for one installed application
///
/// Immutable once parsed; owned by the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationDescriptor {
    /// Unique id, derived from the source file stem
    pub id: String,
    /// Name shown to the user
    pub display_name: String,
    /// Launch template with `%f`/`%F`/`%u`/`%U` placeholders
    pub exec_template: String,
    /// MIME types this application declares support for, in declaration order
    pub mime_types: Vec<String>,
    /// Hidden descriptors are never returned by the resolver
    pub hidden: bool,
}

impl ApplicationDescriptor {
    /// Read and parse a descriptor file; the id is the file stem
    pub fn from_file(path: &Path) -> Result<Self, DescriptorError> {
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or(DescriptorError::Invalid("id"))?;
        let contents = std::fs::read_to_string(path)?;
        Self::parse(id, &contents)
    }

    /// Parse descriptor content: line-based `Key=Value` records.
    ///
    /// Comments, blank lines and `[Group]` headers are ignored. Only the
    /// fields this crate consumes are interpreted; unknown keys pass by.
    pub fn parse(id: String, contents: &str) -> Result<Self, DescriptorError> {
        let mut name = None;
        let mut exec = None;
        let mut mime_types = Vec::new();
        let mut hidden = false;

        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(DescriptorError::Parse { line: index + 1 });
            };
            let value = value.trim();
            match key.trim() {
                "Name" => name = Some(value.to_string()),
                "Exec" => exec = Some(value.to_string()),
                "MimeType" => {
                    mime_types = value
                        .split([';', ','])
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "Hidden" | "NoDisplay" => hidden |= parse_bool(value),
                _ => {}
            }
        }

        let display_name = match name {
            Some(n) if !n.is_empty() => n,
            _ => return Err(DescriptorError::Invalid("Name")),
        };
        let exec_template = match exec {
            Some(e) if !e.is_empty() => e,
            _ => return Err(DescriptorError::Invalid("Exec")),
        };

        Ok(Self {
            id,
            display_name,
            exec_template,
            mime_types,
            hidden,
        })
    }
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<ApplicationDescriptor, DescriptorError> {
        ApplicationDescriptor::parse("test".to_string(), contents)
    }

    #[test]
    fn test_parse_minimal() {
        let d = parse("Name=Viewer\nExec=viewer %f\n").unwrap();
        assert_eq!(d.id, "test");
        assert_eq!(d.display_name, "Viewer");
        assert_eq!(d.exec_template, "viewer %f");
        assert!(d.mime_types.is_empty());
        assert!(!d.hidden);
    }

    #[test]
    fn test_parse_mime_type_separators() {
        let d = parse("Name=V\nExec=v %f\nMimeType=image/png;image/jpeg;\n").unwrap();
        assert_eq!(d.mime_types, vec!["image/png", "image/jpeg"]);

        let d = parse("Name=V\nExec=v %f\nMimeType=text/plain, text/html\n").unwrap();
        assert_eq!(d.mime_types, vec!["text/plain", "text/html"]);
    }

    #[test]
    fn test_parse_hidden_flags() {
        let d = parse("Name=V\nExec=v\nHidden=true\n").unwrap();
        assert!(d.hidden);
        let d = parse("Name=V\nExec=v\nNoDisplay=1\n").unwrap();
        assert!(d.hidden);
        let d = parse("Name=V\nExec=v\nHidden=false\n").unwrap();
        assert!(!d.hidden);
    }

    #[test]
    fn test_parse_skips_comments_and_groups() {
        let d = parse("# comment\n[Desktop Entry]\nName=V\n\nExec=v %u\n").unwrap();
        assert_eq!(d.display_name, "V");
    }

    #[test]
    fn test_parse_missing_exec_is_invalid() {
        assert!(matches!(
            parse("Name=V\n"),
            Err(DescriptorError::Invalid("Exec"))
        ));
        assert!(matches!(
            parse("Name=V\nExec=\n"),
            Err(DescriptorError::Invalid("Exec"))
        ));
    }

    #[test]
    fn test_parse_missing_name_is_invalid() {
        assert!(matches!(
            parse("Exec=v %f\n"),
            Err(DescriptorError::Invalid("Name"))
        ));
    }

    #[test]
    fn test_parse_malformed_line() {
        assert!(matches!(
            parse("Name=V\njunk line\nExec=v\n"),
            Err(DescriptorError::Parse { line: 2 })
        ));
    }
}
