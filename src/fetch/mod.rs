//! Loading forecast datasets from disk or over HTTP.

mod client;

pub use client::{BasicClient, HttpClient};

use anyhow::{Context, Result};
use tracing::debug;

use crate::dataset::{ForecastDataset, parse_dataset};

/// GETs `url` and returns the body, failing on non-2xx responses.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Returns `true` when `source` should be fetched rather than read from disk.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Reads raw bytes from a local path or an `http(s)` URL.
#[tracing::instrument(skip_all, fields(source = %source))]
pub async fn read_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if is_remote(source) {
        let client = BasicClient::new()?;
        fetch_bytes(&client, source)
            .await
            .with_context(|| format!("failed to fetch {source}"))?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read {source}"))?
    };
    debug!(bytes = bytes.len(), "Dataset bytes loaded");
    Ok(bytes)
}

/// Reads and decodes a [`ForecastDataset`] from a local path or URL.
pub async fn load_dataset(source: &str) -> Result<ForecastDataset> {
    let bytes = read_source(source).await?;
    parse_dataset(&bytes).with_context(|| format!("invalid dataset at {source}"))
}
