//! Persisted sync indexes: the date checkpoint and the metadata store.
//!
//! Both are plain JSON arrays. A missing file means "empty"; a malformed file
//! is an error naming the file, since the only recovery is to delete it.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

use crate::record::ImageRecord;
use crate::storage;

/// Read a JSON array from `path`. Returns `None` if the file does not exist.
fn load_array<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    let items: Vec<T> = serde_json::from_slice(&bytes).with_context(|| {
        format!(
            "parse {} (delete it to rebuild from the remote catalog)",
            path.display()
        )
    })?;
    Ok(Some(items))
}

fn save_array<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let json = serde_json::to_vec(items).with_context(|| format!("serialize {}", path.display()))?;
    storage::write_atomic(path, &json).with_context(|| format!("write {}", path.display()))
}

/// Dates (`YYYY-MM-DD`) whose metadata has been fetched. Insertion order is
/// preserved on disk; membership checks use a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateIndex {
    dates: Vec<String>,
    seen: HashSet<String>,
}

impl DateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the checkpoint. `Ok(None)` if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        Ok(load_array::<String>(path)?.map(Self::from_dates))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_array(path, &self.dates)
    }

    pub fn from_dates(dates: Vec<String>) -> Self {
        let seen = dates.iter().cloned().collect();
        Self { dates, seen }
    }

    pub fn contains(&self, date: &str) -> bool {
        self.seen.contains(date)
    }

    /// Record `date`. Returns false if it was already present.
    pub fn insert(&mut self, date: &str) -> bool {
        if !self.seen.insert(date.to_string()) {
            return false;
        }
        self.dates.push(date.to_string());
        true
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Every metadata record fetched so far, in fetch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataStore {
    records: Vec<ImageRecord>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store. `Ok(None)` if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        Ok(load_array::<ImageRecord>(path)?.map(|records| Self { records }))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_array(path, &self.records)
    }

    pub fn extend(&mut self, records: &[ImageRecord]) {
        self.records.extend_from_slice(records);
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_files_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DateIndex::load(&dir.path().join("dates_acquired.json"))
            .unwrap()
            .is_none());
        assert!(MetadataStore::load(&dir.path().join("EPIC_data.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn date_index_insert_dedups_and_keeps_order() {
        let mut idx = DateIndex::from_dates(vec!["2015-06-02".into()]);
        assert!(idx.insert("2015-06-01"));
        assert!(!idx.insert("2015-06-02"));
        assert!(idx.contains("2015-06-01"));
        assert_eq!(idx.dates(), ["2015-06-02", "2015-06-01"]);
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn date_index_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dates_acquired.json");
        let mut idx = DateIndex::new();
        idx.insert("2015-06-13");
        idx.insert("2015-06-14");
        idx.save(&path).unwrap();

        let loaded = DateIndex::load(&path).unwrap().unwrap();
        assert_eq!(loaded, idx);
        let raw: Vec<String> = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw, ["2015-06-13", "2015-06-14"]);
    }

    #[test]
    fn metadata_roundtrip_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("EPIC_data.json");
        let mut store = MetadataStore::new();
        store.extend(&[
            ImageRecord::new(json!({"image": "a", "version": "03"})),
            ImageRecord::new(json!({"image": "b", "coords": [1, 2, 3]})),
        ]);
        store.save(&path).unwrap();

        let loaded = MetadataStore::load(&path).unwrap().unwrap();
        assert_eq!(loaded, store);
        assert_eq!(loaded.records()[1].as_json()["coords"], json!([1, 2, 3]));
    }

    #[test]
    fn malformed_checkpoint_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dates_acquired.json");
        std::fs::write(&path, b"[\"2015-06-01\",").unwrap();
        let err = DateIndex::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("dates_acquired.json"));
    }

    #[test]
    fn wrong_shape_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("EPIC_data.json");
        std::fs::write(&path, b"{\"image\": \"a\"}").unwrap();
        assert!(MetadataStore::load(&path).is_err());
    }
}
