//! Line classification shared by the heading-oriented transforms.
//!
//! Every stage threads an ordered sequence of text lines, each retaining its
//! own trailing terminator. Blank lines, indented code (4+ leading columns),
//! and fenced code blocks are inert to all heading transforms.

use std::sync::LazyLock;

use regex::Regex;

/// Leading-whitespace threshold: at this many columns a line is indented code.
pub(crate) const INDENTED_CODE_COLUMNS: usize = 4;

/// Opening/closing marker of a fenced code block.
pub(crate) const FENCE_MARKER: &str = "```";

/// Splits a heading line (after leading whitespace is stripped) into its
/// `#` run and title text.
pub(crate) static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+) (.*)").expect("valid regex"));

/// Number of leading whitespace columns (bytes before the first
/// non-whitespace character).
pub(crate) fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// A line containing only whitespace.
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Split text into lines, each keeping its trailing `\n` (the final line may
/// lack one).
pub(crate) fn split_keepends(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}
