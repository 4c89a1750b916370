use std::collections::BTreeMap;

use html2md::parse_html_custom;
use serde::Deserialize;

use super::rules::{self, References};
use crate::error::ConvertError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// `[text](href)`
    Inlined,
    /// `[text][n]` plus a `[n]: href` list after the document.
    #[default]
    Referenced,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStyle {
    #[default]
    Atx,
    Setext,
}

/// Rendering options for the HTML to Markdown conversion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConverterOptions {
    pub strong_delimiter: String,
    pub em_delimiter: String,
    pub link_style: LinkStyle,
    pub heading_style: HeadingStyle,
    /// Tag name to literal replacement text. The element and its content are
    /// dropped in favour of the replacement.
    pub tag_overrides: BTreeMap<String, String>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            strong_delimiter: "**".to_string(),
            em_delimiter: "_".to_string(),
            link_style: LinkStyle::default(),
            heading_style: HeadingStyle::default(),
            tag_overrides: BTreeMap::from([("br".to_string(), "\n".to_string())]),
        }
    }
}

impl ConverterOptions {
    pub fn validate(&self) -> Result<(), ConvertError> {
        for (label, delimiter) in [
            ("strong_delimiter", &self.strong_delimiter),
            ("em_delimiter", &self.em_delimiter),
        ] {
            if delimiter.is_empty() || delimiter.chars().any(char::is_whitespace) {
                return Err(ConvertError::InvalidOptions(format!(
                    "{} must be non-empty and contain no whitespace, got {:?}",
                    label, delimiter
                )));
            }
        }

        for tag in self.tag_overrides.keys() {
            if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConvertError::InvalidOptions(format!(
                    "tag override key {:?} is not a tag name",
                    tag
                )));
            }
        }

        Ok(())
    }
}

/// Converts an HTML document to raw, un-normalized Markdown.
pub fn run(bytes: &[u8], options: &ConverterOptions) -> Result<String, ConvertError> {
    options.validate()?;

    // Convert bytes to string
    let html_content = String::from_utf8(bytes.to_vec())?;

    let references = References::default();
    let rules = rules::rule_set(options, &references);

    let mut markdown = parse_html_custom(&html_content, &rules);

    let references = references.borrow();
    if !references.is_empty() {
        markdown.push_str("\n\n");
        markdown.push_str(&rules::reference_list(&references));
        markdown.push('\n');
    }

    if markdown.trim().is_empty() {
        tracing::warn!(html_bytes = bytes.len(), "HTML converted to empty markdown");
    }
    tracing::debug!(
        html_bytes = bytes.len(),
        markdown_bytes = markdown.len(),
        links = references.len(),
        "converted HTML"
    );

    Ok(markdown)
}
