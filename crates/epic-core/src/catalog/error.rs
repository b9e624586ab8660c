//! Error type for catalog HTTP requests.

use thiserror::Error;

/// Failure of a single GET against the catalog. Every variant carries the URL
/// so the top-level error message says which request failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (bad URL, DNS, connect, timeout, ...).
    #[error("GET {url} failed")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// HTTP response had a non-2xx status.
    #[error("GET {url} returned HTTP {code}")]
    Http { url: String, code: u32 },
    /// Body was not the JSON shape we expected.
    #[error("invalid JSON from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Curl { url, .. }
            | FetchError::Http { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}
