//! Remote EPIC catalog: available dates, per-date metadata and image bytes.

mod error;
mod http;
pub mod urls;

pub use error::FetchError;
use http::{get, get_json};
pub use http::HttpOptions;

use anyhow::Result;
use url::Url;

use crate::config::{EpicConfig, Quality};
use crate::record::ImageRecord;

/// Read-only view of the remote catalog used by the sync runner.
pub trait Catalog {
    /// Every date (`YYYY-MM-DD`) that has natural-color imagery.
    fn available_dates(&self) -> Result<Vec<String>>;

    /// Metadata records for one date.
    fn records_for_date(&self, date: &str) -> Result<Vec<ImageRecord>>;

    /// Raw bytes of one image file.
    fn fetch_image(&self, date: &str, quality: Quality, file_name: &str) -> Result<Vec<u8>>;
}

/// Catalog backed by the EPIC HTTP API (curl).
#[derive(Debug, Clone)]
pub struct EpicClient {
    base: Url,
    http: HttpOptions,
}

impl EpicClient {
    pub fn new(base_url: &str, http: HttpOptions) -> Result<Self> {
        Ok(Self {
            base: urls::parse_base(base_url)?,
            http,
        })
    }

    pub fn from_config(cfg: &EpicConfig) -> Result<Self> {
        Self::new(
            &cfg.base_url,
            HttpOptions {
                connect_timeout: cfg.connect_timeout(),
                timeout: cfg.timeout(),
            },
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }
}

impl Catalog for EpicClient {
    fn available_dates(&self) -> Result<Vec<String>> {
        let url = urls::available_url(&self.base)?;
        Ok(get_json(url.as_str(), self.http)?)
    }

    fn records_for_date(&self, date: &str) -> Result<Vec<ImageRecord>> {
        let url = urls::date_url(&self.base, date)?;
        Ok(get_json(url.as_str(), self.http)?)
    }

    fn fetch_image(&self, date: &str, quality: Quality, file_name: &str) -> Result<Vec<u8>> {
        let url = urls::image_url(&self.base, date, quality, file_name)?;
        Ok(get(url.as_str(), self.http)?)
    }
}
