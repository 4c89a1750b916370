use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::error::ConvertError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("mdfetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Checks that `url` is a non-empty absolute http(s) URL.
pub fn parse_url(url: &str) -> Result<Url, ConvertError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ConvertError::MissingUrl);
    }

    let parsed = Url::parse(url).map_err(|e| ConvertError::InvalidUrl(format!("{}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ConvertError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            url, other
        ))),
    }
}

/// Downloads the document behind `url` and returns its body.
pub fn fetch(url: &str, settings: &FetchSettings) -> Result<Vec<u8>, ConvertError> {
    let url = parse_url(url)?;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .user_agent(settings.user_agent.as_str())
        .build()?;

    tracing::info!(%url, "fetching");
    let response = client.get(url.clone()).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(ConvertError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.bytes()?;
    tracing::debug!(%url, bytes = body.len(), "fetched");
    Ok(body.to_vec())
}
