//! Override list parsing
//!
//! Line-based format: `[mime/type]` section headers select the MIME type,
//! followed by `add <id>`, `remove <id>` or `default <id>` directive lines.
//! Malformed lines are skipped with a warning; parsing never fails.

use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverrideAction {
    /// Append the id to the MIME type's sequence if not already present
    Add,
    /// Delete the id from the sequence (clears the default if it matches)
    Remove,
    /// Make the id the preferred default, adding it if absent
    Default,
}

/// One directive from an override list, in declaration order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverrideDirective {
    pub mime_type: String,
    pub action: OverrideAction,
    pub id: String,
}

/// Parse override list content into directives, declaration order preserved
pub fn parse_overrides(contents: &str) -> Vec<OverrideDirective> {
    let mut directives = Vec::new();
    let mut current: Option<String> = None;

    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            current = Some(section.trim().to_string());
            continue;
        }

        let Some(mime_type) = current.clone() else {
            tracing::warn!("override line {} before any [mime/type] section", index + 1);
            continue;
        };
        let (verb, id) = match line.split_once(char::is_whitespace) {
            Some((verb, id)) if !id.trim().is_empty() => (verb, id.trim()),
            _ => {
                tracing::warn!("override line {}: expected `<verb> <id>`", index + 1);
                continue;
            }
        };
        let action = match verb {
            "add" => OverrideAction::Add,
            "remove" => OverrideAction::Remove,
            "default" => OverrideAction::Default,
            other => {
                tracing::warn!("override line {}: unknown verb `{}`", index + 1, other);
                continue;
            }
        };
        directives.push(OverrideDirective {
            mime_type,
            action,
            id: id.to_string(),
        });
    }

    directives
}

/// Load an override list from disk; a missing file is an empty list
pub fn load_overrides(path: &Path) -> Vec<OverrideDirective> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_overrides(&contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            tracing::warn!("cannot read overrides {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_and_directives() {
        let directives = parse_overrides(
            "# comment\n\
             [image/png]\n\
             add gimp\n\
             remove eog\n\
             [text/plain]\n\
             default vim\n",
        );
        assert_eq!(
            directives,
            vec![
                OverrideDirective {
                    mime_type: "image/png".into(),
                    action: OverrideAction::Add,
                    id: "gimp".into(),
                },
                OverrideDirective {
                    mime_type: "image/png".into(),
                    action: OverrideAction::Remove,
                    id: "eog".into(),
                },
                OverrideDirective {
                    mime_type: "text/plain".into(),
                    action: OverrideAction::Default,
                    id: "vim".into(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_skips_bad_lines() {
        let directives = parse_overrides(
            "add orphan\n\
             [image/png]\n\
             frobnicate gimp\n\
             add\n\
             add gimp\n",
        );
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].id, "gimp");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        assert!(load_overrides(Path::new("/nonexistent/overrides.list")).is_empty());
    }
}
