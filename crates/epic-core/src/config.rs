use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default EPIC API host.
pub const DEFAULT_BASE_URL: &str = "https://epic.gsfc.nasa.gov/";

/// Image quality to mirror. Determines the archive path segment, the file
/// extension and the local image directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Full-resolution PNG.
    Full,
    /// Half-resolution JPEG.
    #[default]
    Half,
    /// Thumbnail JPEG.
    Thumbs,
}

impl Quality {
    /// Path segment under `archive/natural/YYYY/MM/DD/`.
    pub fn archive_segment(self) -> &'static str {
        match self {
            Quality::Full => "png",
            Quality::Half => "jpg",
            Quality::Thumbs => "thumbs",
        }
    }

    /// Extension of the stored image file (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Quality::Full => "png",
            Quality::Half | Quality::Thumbs => "jpg",
        }
    }

    /// Directory under `EPIC/` holding images of this quality. Thumbnails get
    /// their own directory since they share the `.jpg` extension with half.
    pub fn image_dir_name(self) -> &'static str {
        match self {
            Quality::Thumbs => "natural_thumbs",
            Quality::Full | Quality::Half => "natural",
        }
    }
}

/// Options for a single sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    pub quality: Quality,
    /// Maintain `EPIC_data.json` with every fetched metadata record.
    pub save_metadata: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            quality: Quality::Half,
            save_metadata: true,
        }
    }
}

/// Global configuration loaded from `~/.config/epic-mirror/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EpicConfig {
    /// Image quality: "full", "half" or "thumbs".
    pub quality: Quality,
    /// Keep accumulated metadata records in `EPIC_data.json`.
    pub save_metadata: bool,
    /// Root of the EPIC site; API and archive paths are joined beneath it.
    pub base_url: String,
    /// Connection timeout per request, in seconds.
    pub connect_timeout_secs: u64,
    /// Overall timeout per request, in seconds.
    pub timeout_secs: u64,
}

impl Default for EpicConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            save_metadata: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 120,
        }
    }
}

impl EpicConfig {
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            quality: self.quality,
            save_metadata: self.save_metadata,
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("epic-mirror")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<EpicConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = EpicConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: EpicConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
