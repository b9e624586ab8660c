//! Blocking HTTP GET via libcurl.
//!
//! Bodies are buffered in memory: catalog JSON and EPIC images are small.

use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::FetchError;

/// Per-request curl settings.
#[derive(Debug, Clone, Copy)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(120),
        }
    }
}

/// GET `url` and return the body. Follows redirects; non-2xx is an error.
pub fn get(url: &str, opts: HttpOptions) -> Result<Vec<u8>, FetchError> {
    let curl_err = |source: curl::Error| FetchError::Curl {
        url: url.to_string(),
        source,
    };
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    easy.max_redirections(10).map_err(curl_err)?;
    easy.connect_timeout(opts.connect_timeout).map_err(curl_err)?;
    easy.timeout(opts.timeout).map_err(curl_err)?;
    easy.useragent(concat!("epic-mirror/", env!("CARGO_PKG_VERSION")))
        .map_err(curl_err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(curl_err)?;
        transfer.perform().map_err(curl_err)?;
    }

    let code = easy.response_code().map_err(curl_err)?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http {
            url: url.to_string(),
            code,
        });
    }
    tracing::debug!(url, bytes = body.len(), "GET ok");
    Ok(body)
}

/// GET `url` and decode the body as JSON.
pub fn get_json<T: DeserializeOwned>(url: &str, opts: HttpOptions) -> Result<T, FetchError> {
    let body = get(url, opts)?;
    serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}
