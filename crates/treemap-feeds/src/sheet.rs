//! Where the submissions CSV comes from.
//!
//! A published spreadsheet is fetched over HTTP(S) with a cache-defeating
//! query parameter so every load sees the latest snapshot. A local file is
//! read as-is. Either way the fetch is a single attempt with no retry.

use crate::csv_rows::parse_rows;
use crate::error::LoadError;
use std::path::PathBuf;
use std::time::Duration;
use treemap_core::config::SourceConfig;
use treemap_core::RawRecord;
use url::Url;

/// Where to load the submissions sheet from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSource {
    Published {
        url: Url,
        cache_bust_param: String,
        timeout: Duration,
    },
    File(PathBuf),
}

impl SheetSource {
    /// Interpret `location` as an `http(s)` URL when it has that scheme,
    /// otherwise as a local path.
    pub fn from_location(location: &str, config: &SourceConfig) -> Result<Self, LoadError> {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(location).map_err(|e| LoadError::InvalidUrl {
                url: location.to_string(),
                reason: e.to_string(),
            })?;
            Ok(SheetSource::Published {
                url,
                cache_bust_param: config.cache_bust_param.clone(),
                timeout: Duration::from_secs(config.timeout_secs),
            })
        } else if location.is_empty() {
            Err(LoadError::InvalidUrl {
                url: String::new(),
                reason: "no sheet location configured".to_string(),
            })
        } else {
            Ok(SheetSource::File(PathBuf::from(location)))
        }
    }

    /// The configured `[source] url`.
    pub fn from_config(config: &SourceConfig) -> Result<Self, LoadError> {
        Self::from_location(&config.url, config)
    }

    /// Human-readable location for logs and the UI title.
    pub fn describe(&self) -> String {
        match self {
            SheetSource::Published { url, .. } => url.to_string(),
            SheetSource::File(path) => path.display().to_string(),
        }
    }

    /// Fetch the raw CSV text.
    pub async fn fetch_text(&self) -> Result<String, LoadError> {
        match self {
            SheetSource::Published {
                url,
                cache_bust_param,
                timeout,
            } => {
                let busted = cache_bust_url(url, cache_bust_param, now_millis());
                tracing::debug!(url = %busted, "fetching published sheet");

                let client = reqwest::Client::builder().timeout(*timeout).build()?;
                let response = client.get(busted).send().await?;

                if !response.status().is_success() {
                    tracing::warn!(status = %response.status(), "sheet fetch rejected");
                    return Err(LoadError::Status(response.status().as_u16()));
                }
                Ok(response.text().await?)
            }
            SheetSource::File(path) => {
                tracing::debug!(path = %path.display(), "reading sheet file");
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|source| LoadError::Read {
                        path: path.clone(),
                        source,
                    })?;
                // Decoded lossily, like `response.text()` above.
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }

    /// Fetch and parse the sheet into raw rows.
    pub async fn fetch_rows(&self) -> Result<Vec<RawRecord>, LoadError> {
        let text = self.fetch_text().await?;
        parse_rows(&text)
    }
}

/// Append `param=<stamp>` to `url`, keeping any existing query.
pub fn cache_bust_url(url: &Url, param: &str, stamp: i64) -> Url {
    let mut busted = url.clone();
    busted
        .query_pairs_mut()
        .append_pair(param, &stamp.to_string());
    busted
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
