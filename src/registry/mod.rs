//! Application descriptor registry
//!
//! Scans an ordered list of descriptor directories into one immutable
//! registry. Directory order encodes precedence: when two directories carry
//! the same descriptor id, the earlier one wins.

mod descriptor;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub use descriptor::{ApplicationDescriptor, DescriptorError};

/// Record of a descriptor file that could not be used
#[derive(Debug)]
pub struct ScanDiagnostic {
    pub path: PathBuf,
    pub error: DescriptorError,
}

/// Immutable registry of application descriptors, discovery order preserved
#[derive(Debug, Default)]
pub struct Registry {
    descriptors: Vec<ApplicationDescriptor>,
    by_id: HashMap<String, usize>,
    diagnostics: Vec<ScanDiagnostic>,
}

impl Registry {
    /// Scan descriptor directories, earliest first.
    ///
    /// Parse failures and invalid descriptors are recorded as diagnostics
    /// and the scan continues; a missing directory contributes nothing.
    pub fn scan(directories: &[PathBuf]) -> Self {
        let mut registry = Self::default();
        for dir in directories {
            registry.scan_directory(dir);
        }
        tracing::debug!(
            descriptors = registry.descriptors.len(),
            skipped = registry.diagnostics.len(),
            "descriptor scan complete"
        );
        registry
    }

    fn scan_directory(&mut self, dir: &Path) {
        let walker = WalkDir::new(dir).sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!("skipping {}: {}", dir.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("desktop") {
                continue;
            }
            self.add_file(path);
        }
    }

    fn add_file(&mut self, path: &Path) {
        match ApplicationDescriptor::from_file(path) {
            Ok(descriptor) => {
                // Earlier directory wins duplicate ids.
                if self.by_id.contains_key(&descriptor.id) {
                    return;
                }
                self.by_id
                    .insert(descriptor.id.clone(), self.descriptors.len());
                self.descriptors.push(descriptor);
            }
            Err(error) => {
                tracing::warn!("skipping descriptor {}: {}", path.display(), error);
                self.diagnostics.push(ScanDiagnostic {
                    path: path.to_path_buf(),
                    error,
                });
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ApplicationDescriptor> {
        self.by_id.get(id).map(|&i| &self.descriptors[i])
    }

    /// Descriptors in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &ApplicationDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Files skipped during the scan, with the reason each was skipped
    pub fn diagnostics(&self) -> &[ScanDiagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_descriptor(dir: &Path, id: &str, contents: &str) {
        std::fs::write(dir.join(format!("{}.desktop", id)), contents).unwrap();
    }

    #[test]
    fn test_scan_collects_descriptors() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(dir.path(), "viewer", "Name=Viewer\nExec=viewer %f\nMimeType=image/png\n");
        write_descriptor(dir.path(), "editor", "Name=Editor\nExec=editor %F\n");

        let registry = Registry::scan(&[dir.path().to_path_buf()]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("viewer").unwrap().display_name, "Viewer");
        assert_eq!(registry.get("editor").unwrap().exec_template, "editor %F");
        assert!(registry.diagnostics().is_empty());
    }

    #[test]
    fn test_scan_earlier_directory_wins() {
        let user = tempfile::tempdir().unwrap();
        let system = tempfile::tempdir().unwrap();
        write_descriptor(user.path(), "viewer", "Name=User Viewer\nExec=uview %f\n");
        write_descriptor(system.path(), "viewer", "Name=System Viewer\nExec=sview %f\n");

        let registry = Registry::scan(&[user.path().to_path_buf(), system.path().to_path_buf()]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("viewer").unwrap().display_name, "User Viewer");
    }

    #[test]
    fn test_scan_skips_invalid_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(dir.path(), "broken", "Name=Broken\nnot a pair\n");
        write_descriptor(dir.path(), "no-exec", "Name=No Exec\n");
        write_descriptor(dir.path(), "ok", "Name=Ok\nExec=ok %f\n");

        let registry = Registry::scan(&[dir.path().to_path_buf()]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("ok").is_some());
        assert_eq!(registry.diagnostics().len(), 2);
    }

    #[test]
    fn test_scan_ignores_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "not a descriptor").unwrap();
        write_descriptor(dir.path(), "ok", "Name=Ok\nExec=ok\n");

        let registry = Registry::scan(&[dir.path().to_path_buf()]);
        assert_eq!(registry.len(), 1);
        assert!(registry.diagnostics().is_empty());
    }

    #[test]
    fn test_scan_missing_directory() {
        let registry = Registry::scan(&[PathBuf::from("/nonexistent/mklist-test")]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_scan_discovery_order_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(dir.path(), "zed", "Name=Z\nExec=z\n");
        write_descriptor(dir.path(), "ack", "Name=A\nExec=a\n");

        let registry = Registry::scan(&[dir.path().to_path_buf()]);
        let ids: Vec<&str> = registry.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["ack", "zed"]);
    }
}
