//! File list model
//!
//! Ordered list of paths with plain-text import and export, one path per
//! line. Import replaces the current content.

use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default)]
pub struct FileList {
    entries: Vec<PathBuf>,
}

impl FileList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: PathBuf) {
        self.entries.push(path);
    }

    /// Remove and return the entry at `index`, or None when out of range
    pub fn remove(&mut self, index: usize) -> Option<PathBuf> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the list with the non-empty lines of a list file
    pub fn import(&mut self, path: &Path) -> std::io::Result<()> {
        let contents = std::fs::read_to_string(path)?;
        self.entries = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(PathBuf::from)
            .collect();
        Ok(())
    }

    /// Write the list, one path per line
    pub fn export(&self, path: &Path) -> std::io::Result<()> {
        let mut file = std::fs::File::create(path)?;
        for entry in &self.entries {
            writeln!(file, "{}", entry.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_remove() {
        let mut list = FileList::new();
        list.push(PathBuf::from("/a"));
        list.push(PathBuf::from("/b"));
        assert_eq!(list.len(), 2);

        assert_eq!(list.remove(0), Some(PathBuf::from("/a")));
        assert_eq!(list.get(0), Some(Path::new("/b")));
        assert_eq!(list.remove(5), None);
    }

    #[test]
    fn test_import_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let list_file = dir.path().join("files.txt");
        std::fs::write(&list_file, "/x/one\n\n/x/two three\n").unwrap();

        let mut list = FileList::new();
        list.push(PathBuf::from("/old"));
        list.import(&list_file).unwrap();

        let entries: Vec<&Path> = list.iter().collect();
        assert_eq!(entries, vec![Path::new("/x/one"), Path::new("/x/two three")]);
    }

    #[test]
    fn test_export_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let list_file = dir.path().join("out.txt");

        let mut list = FileList::new();
        list.push(PathBuf::from("/a/b.png"));
        list.push(PathBuf::from("/c d/e.txt"));
        list.export(&list_file).unwrap();

        assert_eq!(
            std::fs::read_to_string(&list_file).unwrap(),
            "/a/b.png\n/c d/e.txt\n"
        );

        let mut imported = FileList::new();
        imported.import(&list_file).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported.get(1), Some(Path::new("/c d/e.txt")));
    }

    #[test]
    fn test_import_missing_file() {
        let mut list = FileList::new();
        assert!(list.import(Path::new("/nonexistent/list.txt")).is_err());
    }
}
