use std::path::PathBuf;

/// Failures of a single conversion request. Normalization itself cannot fail
/// and has no variant here.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("URL is required")]
    MissingUrl,
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Failed to fetch URL {url}: server responded with {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Failed to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid UTF-8 encoding: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("Invalid converter options: {0}")]
    InvalidOptions(String),
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
}
