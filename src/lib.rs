pub mod config;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod normalizer;
pub mod telemetry;

use std::path::Path;

pub use config::Settings;
pub use error::ConvertError;
pub use normalizer::{NormalizeMode, normalize, normalize_with};

// html bytes -> cleaned markdown
pub fn convert_html(bytes: &[u8], settings: &Settings) -> Result<String, ConvertError> {
    let raw = generator::html2md::run(bytes, &settings.converter)?;
    let markdown = normalize_with(&raw, settings.normalize);

    tracing::debug!(
        mode = %settings.normalize,
        raw_bytes = raw.len(),
        markdown_bytes = markdown.len(),
        "normalized markdown"
    );
    Ok(markdown)
}

pub fn convert_url(url: &str, settings: &Settings) -> Result<String, ConvertError> {
    let body = fetch::fetch(url, &settings.fetch)?;
    convert_html(&body, settings)
}

pub fn convert_from_path(file_path: impl AsRef<Path>, settings: &Settings) -> Result<String, ConvertError> {
    let path = file_path.as_ref();
    let file_stream = std::fs::read(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    convert_html(&file_stream, settings)
}

/// Treats `input` as a URL when it has an http(s) scheme, otherwise as a
/// local file path.
pub fn convert_input(input: &str, settings: &Settings) -> Result<String, ConvertError> {
    let lower = input.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        tracing::info!(url = input, "converting URL");
        convert_url(input, settings)
    } else {
        tracing::info!(path = input, "converting file");
        convert_from_path(input, settings)
    }
}
