//! Disk writes for images and index files.
//!
//! Every file is written to a `.part` sibling, synced, then renamed over the
//! final name, so a crash never leaves a truncated file under the final name.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.jpg` → `a.jpg.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// True if `name` is a leftover temp file from an interrupted write.
pub fn is_temp_name(name: &str) -> bool {
    name.ends_with(TEMP_SUFFIX)
}

/// Write `data` to `final_path` via a synced temp file and rename.
/// Overwrites `final_path` if it already exists.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> Result<()> {
    let tp = temp_path(final_path);
    {
        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tp)
            .with_context(|| format!("failed to create temp file: {}", tp.display()))?;
        file.write_all(data)
            .with_context(|| format!("failed to write {}", tp.display()))?;
        file.sync_all().context("storage sync failed")?;
    }

    std::fs::rename(&tp, final_path).with_context(|| {
        format!(
            "failed to rename {} to {}",
            tp.display(),
            final_path.display()
        )
    })?;
    Ok(())
}
