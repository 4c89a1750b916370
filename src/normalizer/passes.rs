//! Individual cleanup passes. Each one is a pure rewrite of the whole
//! document; the order they run in is fixed by [`super::FULL_PIPELINE`].

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(?:[ \t\r]*\n){2,}").unwrap());
static TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r]+\n").unwrap());
static INNER_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static EMPTY_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[\s&&[^\n]]*[-*+][\s&&[^\n]]*(?:\n|\z)").unwrap());
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static LOOSE_LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n([-*+][ \t])").unwrap());

/// Rewrites every CRLF pair to a single LF.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Caps blank space between blocks at one empty line. Lines holding only
/// spaces, tabs or stray CRs count as blank.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

pub fn strip_trailing_whitespace(text: &str) -> String {
    TRAILING_WS.replace_all(text, "\n").into_owned()
}

/// Collapses runs of two or more spaces/tabs into one space.
pub fn collapse_inner_spaces(text: &str) -> String {
    INNER_WS.replace_all(text, " ").into_owned()
}

/// Deletes lines that hold nothing but a bare `-`, `*` or `+` marker.
///
/// Dropping a line that sat between two blank lines would leave two blank
/// lines behind, so the newline cap is re-applied afterwards.
pub fn remove_empty_bullets(text: &str) -> String {
    let stripped = EMPTY_BULLET.replace_all(text, "");
    NEWLINE_RUN.replace_all(&stripped, "\n\n").into_owned()
}

/// Removes the blank line in front of an unordered list item.
pub fn tighten_list_items(text: &str) -> String {
    LOOSE_LIST_ITEM.replace_all(text, "\n$1").into_owned()
}

pub fn trim_outer(text: &str) -> String {
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\r\n"), "a\nb\n");
        // lone CRs are left alone
        assert_eq!(normalize_line_endings("a\rb"), "a\rb");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n  \n\t\n\nb"), "a\n\nb");
        // indentation of the following line is kept
        assert_eq!(collapse_blank_lines("a\n\n\n  b"), "a\n\n  b");
    }

    #[test]
    fn test_strip_trailing_whitespace() {
        assert_eq!(strip_trailing_whitespace("a  \nb\t\nc"), "a\nb\nc");
        assert_eq!(strip_trailing_whitespace("a \r\n"), "a\n");
        assert_eq!(strip_trailing_whitespace("  \n"), "\n");
    }

    #[test]
    fn test_collapse_inner_spaces() {
        assert_eq!(collapse_inner_spaces("a   b\t\tc d"), "a b c d");
        assert_eq!(collapse_inner_spaces("    - nested"), " - nested");
        assert_eq!(collapse_inner_spaces("a\tb"), "a\tb");
    }

    #[test]
    fn test_remove_empty_bullets() {
        assert_eq!(remove_empty_bullets("- a\n-\n- b\n"), "- a\n- b\n");
        assert_eq!(remove_empty_bullets("* \n+\t\nx"), "x");
        assert_eq!(remove_empty_bullets("x\n-"), "x\n");
        assert_eq!(remove_empty_bullets("  -\nx"), "x");
    }

    #[test]
    fn test_remove_empty_bullets_keeps_content() {
        assert_eq!(remove_empty_bullets("- a\n"), "- a\n");
        assert_eq!(remove_empty_bullets("---\n"), "---\n");
        assert_eq!(remove_empty_bullets("**\n"), "**\n");
        assert_eq!(remove_empty_bullets("1.\n"), "1.\n");
    }

    #[test]
    fn test_remove_empty_bullet_between_blank_lines() {
        assert_eq!(remove_empty_bullets("a\n\n-\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_tighten_list_items() {
        assert_eq!(tighten_list_items("- a\n\n- b\n\n* c"), "- a\n- b\n* c");
        assert_eq!(tighten_list_items("intro\n\n+ a"), "intro\n+ a");
        // only unordered, unindented markers
        assert_eq!(tighten_list_items("a\n\n1. b"), "a\n\n1. b");
        assert_eq!(tighten_list_items("a\n\n  - b"), "a\n\n  - b");
        assert_eq!(tighten_list_items("a\n\n-b"), "a\n\n-b");
    }

    #[test]
    fn test_trim_outer() {
        assert_eq!(trim_outer("\n\n  a b \n"), "a b");
        assert_eq!(trim_outer(" \t\n"), "");
    }
}
