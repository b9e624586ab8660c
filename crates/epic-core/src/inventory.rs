//! Local image inventory: bare file names already present in the image directory.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::storage;

/// File names present in one image directory.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    names: HashSet<String>,
}

impl Inventory {
    /// List `dir` and collect the names of regular files. Subdirectories and
    /// `.part` leftovers are skipped.
    pub fn scan(dir: &Path) -> Result<Self> {
        let mut names = HashSet::new();
        let entries =
            std::fs::read_dir(dir).with_context(|| format!("list dir: {}", dir.display()))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("list dir: {}", dir.display()))?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if storage::is_temp_name(&name) {
                tracing::debug!("ignoring partial file {}", name);
                continue;
            }
            names.insert(name);
        }
        Ok(Self { names })
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.names.contains(file_name)
    }

    pub fn insert(&mut self, file_name: &str) {
        self.names.insert(file_name.to_string());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_collects_bare_file_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("epic_1b_a.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("epic_1b_b.jpg"), b"y").unwrap();

        let inv = Inventory::scan(dir.path()).unwrap();
        assert_eq!(inv.len(), 2);
        assert!(inv.contains("epic_1b_a.jpg"));
        assert!(inv.contains("epic_1b_b.jpg"));
        assert!(!inv.contains(&dir.path().join("epic_1b_a.jpg").to_string_lossy()));
    }

    #[test]
    fn scan_skips_dirs_and_partials() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub.jpg")).unwrap();
        std::fs::write(dir.path().join("epic_1b_c.jpg.part"), b"half").unwrap();

        let inv = Inventory::scan(dir.path()).unwrap();
        assert!(inv.is_empty());
    }

    #[test]
    fn scan_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Inventory::scan(&dir.path().join("nope")).is_err());
    }
}
