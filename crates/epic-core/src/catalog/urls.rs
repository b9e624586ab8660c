//! Endpoint URLs of the EPIC API and image archive.

use anyhow::{Context, Result};
use url::Url;

use crate::config::Quality;

/// Parse the configured base URL. A trailing slash is added when missing so
/// relative endpoint paths land beneath it rather than replacing its last segment.
pub fn parse_base(base: &str) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("invalid base URL: {}", base))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("base URL cannot have paths joined to it: {}", base);
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// `{base}api/natural/available`
pub fn available_url(base: &Url) -> Result<Url> {
    join(base, "api/natural/available")
}

/// `{base}api/natural/date/{date}`
pub fn date_url(base: &Url, date: &str) -> Result<Url> {
    join(base, &format!("api/natural/date/{}", date))
}

/// `YYYY-MM-DD` → `YYYY/MM/DD`, as used in archive paths.
pub fn date_path(date: &str) -> String {
    date.replace('-', "/")
}

/// `{base}archive/natural/{YYYY}/{MM}/{DD}/{segment}/{file_name}`
pub fn image_url(base: &Url, date: &str, quality: Quality, file_name: &str) -> Result<Url> {
    join(
        base,
        &format!(
            "archive/natural/{}/{}/{}",
            date_path(date),
            quality.archive_segment(),
            file_name
        ),
    )
}

fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path)
        .with_context(|| format!("cannot join {} onto {}", path, base))
}
