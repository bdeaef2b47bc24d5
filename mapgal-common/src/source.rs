//! Dataset sources
//!
//! Fetching the dataset is the only asynchronous step in the gallery;
//! everything after it runs synchronously.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use reqwest::Url;
use tracing::info;

use crate::{Error, Result};

/// Location of the map dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Local file
    Path(PathBuf),
    /// http:// or https:// resource
    Url(Url),
}

impl DatasetSource {
    /// Read the whole dataset as text
    ///
    /// No retries and no timeout: a failure leaves the gallery unloaded.
    pub async fn fetch(&self) -> Result<String> {
        info!("Fetching dataset from {}", self);
        let text = match self {
            DatasetSource::Path(path) => {
                let bytes = tokio::fs::read(path).await?;
                String::from_utf8_lossy(&bytes).into_owned()
            }
            DatasetSource::Url(url) => {
                let response = reqwest::get(url.clone()).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(Error::HttpStatus {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                response.text().await?
            }
        };
        info!("Fetched {} bytes of dataset", text.len());
        Ok(text)
    }
}

impl FromStr for DatasetSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidInput("empty dataset location".to_string()));
        }

        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(s)
                .map_err(|e| Error::InvalidInput(format!("bad dataset URL '{}': {}", s, e)))?;
            return Ok(DatasetSource::Url(url));
        }

        Ok(DatasetSource::Path(PathBuf::from(s)))
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Path(p) => write!(f, "{}", p.display()),
            DatasetSource::Url(u) => write!(f, "{}", u),
        }
    }
}
