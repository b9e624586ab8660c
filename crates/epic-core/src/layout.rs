//! On-disk layout of a mirrored dataset.
//!
//! ```text
//! {base}/EPIC/
//!     dates_acquired.json
//!     EPIC_data.json
//!     natural/          (full and half quality)
//!     natural_thumbs/   (thumbs quality)
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Quality;

/// Name of the dataset directory created under the base directory.
pub const DATASET_DIR: &str = "EPIC";
/// Checkpoint of fully processed dates.
pub const DATES_FILE: &str = "dates_acquired.json";
/// Accumulated metadata records.
pub const METADATA_FILE: &str = "EPIC_data.json";

/// Resolved paths for one base directory and quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    dataset_dir: PathBuf,
    image_dir: PathBuf,
}

impl DatasetLayout {
    pub fn new(base_dir: &Path, quality: Quality) -> Self {
        let dataset_dir = base_dir.join(DATASET_DIR);
        let image_dir = dataset_dir.join(quality.image_dir_name());
        Self {
            dataset_dir,
            image_dir,
        }
    }

    pub fn dataset_dir(&self) -> &Path {
        &self.dataset_dir
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn dates_path(&self) -> PathBuf {
        self.dataset_dir.join(DATES_FILE)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dataset_dir.join(METADATA_FILE)
    }

    pub fn image_path(&self, file_name: &str) -> PathBuf {
        self.image_dir.join(file_name)
    }

    /// Create the image directory and its parents. Idempotent.
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.image_dir)
            .with_context(|| format!("create dir: {}", self.image_dir.display()))
    }
}
