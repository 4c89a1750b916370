//! Markdown cleanup applied to converter output.
//!
//! Naive HTML conversion leaves artifacts behind: runs of blank lines,
//! trailing whitespace, CRLF endings, doubled spaces, bare list markers and
//! loose lists. [`normalize`] removes them with a fixed sequence of text
//! rewrites. It never fails and is idempotent.
//!
//! ```rust
//! use mdfetch::normalizer::{normalize, normalize_with, NormalizeMode};
//!
//! assert_eq!(normalize("Hello   world\n\n\n\nBye  \n"), "Hello world\n\nBye");
//! assert_eq!(normalize_with("  a   b  ", NormalizeMode::TrimOnly), "a   b");
//! ```

pub mod passes;

use serde::Deserialize;
use std::fmt;

/// A single rewrite step of the pipeline.
pub type Pass = fn(&str) -> String;

/// Every pass in the order it must run. Later passes rely on earlier ones
/// having already collapsed whitespace.
pub const FULL_PIPELINE: [(&str, Pass); 7] = [
    ("line-endings", passes::normalize_line_endings),
    ("blank-lines", passes::collapse_blank_lines),
    ("trailing-whitespace", passes::strip_trailing_whitespace),
    ("inner-spaces", passes::collapse_inner_spaces),
    ("empty-bullets", passes::remove_empty_bullets),
    ("list-items", passes::tighten_list_items),
    ("trim", passes::trim_outer),
];

pub const TRIM_ONLY_PIPELINE: [(&str, Pass); 1] = [("trim", passes::trim_outer)];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizeMode {
    /// All seven cleanup passes.
    #[default]
    Full,
    /// Only strip leading and trailing whitespace.
    TrimOnly,
}

impl NormalizeMode {
    pub fn pipeline(self) -> &'static [(&'static str, Pass)] {
        match self {
            NormalizeMode::Full => &FULL_PIPELINE,
            NormalizeMode::TrimOnly => &TRIM_ONLY_PIPELINE,
        }
    }
}

impl fmt::Display for NormalizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeMode::Full => f.write_str("full"),
            NormalizeMode::TrimOnly => f.write_str("trim-only"),
        }
    }
}

/// Runs the full cleanup pipeline.
pub fn normalize(raw: &str) -> String {
    normalize_with(raw, NormalizeMode::Full)
}

pub fn normalize_with(raw: &str, mode: NormalizeMode) -> String {
    let mut text = raw.to_string();
    for &(name, pass) in mode.pipeline() {
        let before = text.len();
        text = pass(&text);
        tracing::trace!(pass = name, before, after = text.len(), "normalization pass");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_pipeline_order() {
        let names: Vec<&str> = FULL_PIPELINE.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "line-endings",
                "blank-lines",
                "trailing-whitespace",
                "inner-spaces",
                "empty-bullets",
                "list-items",
                "trim",
            ]
        );
    }

    #[test]
    fn test_crlf_before_blank_line_collapse() {
        // with CRLF left in place the blank-line run would not be seen
        assert_eq!(normalize("a\r\n\r\n\r\n\r\nb"), "a\n\nb");
    }

    #[test]
    fn test_trailing_whitespace_before_inner_collapse() {
        assert_eq!(normalize("a  b   \nc"), "a b\nc");
    }

    #[test]
    fn test_empty_bullet_then_tighten() {
        assert_eq!(normalize("intro\n\n-   \n\n- real"), "intro\n- real");
    }

    #[test]
    fn test_trim_only_keeps_inner_content() {
        let raw = "\n  a   b  \n\n\n\n-\n\n- c  \n";
        assert_eq!(normalize_with(raw, NormalizeMode::TrimOnly), "a   b  \n\n\n\n-\n\n- c");
    }

    #[test]
    fn test_mode_display_matches_config_names() {
        assert_eq!(NormalizeMode::Full.to_string(), "full");
        assert_eq!(NormalizeMode::TrimOnly.to_string(), "trim-only");
    }

    #[test]
    fn test_mode_pipelines() {
        assert_eq!(NormalizeMode::Full.pipeline().len(), 7);
        let names: Vec<&str> = NormalizeMode::TrimOnly
            .pipeline()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(names, ["trim"]);
    }
}
