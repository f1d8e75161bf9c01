//! Removal of pre-existing serial numbers from heading titles, driven by a
//! configurable pattern list. Among the patterns that match at the start of
//! a title, the longest match wins.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use docstitch_shared::{DocstitchError, Result};

use crate::lines::{FENCE_MARKER, HEADING_RE, INDENTED_CODE_COLUMNS, indent_width, is_blank};

/// Built-in serial patterns: dotted decimals, plain decimals, Chinese
/// chapter markers, and bracketed alphanumerics.
pub const DEFAULT_STRIP_PATTERNS: [&str; 4] = [
    r"^(\d+\.)+",
    r"^\d+[\.\d+]*",
    r"^第[零一二三四五六七八九十]+(章|节|小节|讲|部分)",
    r"^[\(\[\{]?[a-zA-Z0-9]+[\)\]\}]",
];

/// Compiled set of serial patterns.
#[derive(Debug)]
pub struct StripPatterns {
    patterns: Vec<Regex>,
}

impl StripPatterns {
    /// Compile user-supplied patterns, reporting the offending pattern on
    /// failure.
    pub fn compile(patterns: &[String]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = Regex::new(pattern).map_err(|err| DocstitchError::Pattern {
                pattern: pattern.clone(),
                message: err.to_string(),
            })?;
            compiled.push(regex);
        }
        Ok(Self { patterns: compiled })
    }

    /// The built-in pattern set.
    pub fn defaults() -> Self {
        let patterns: Vec<String> = DEFAULT_STRIP_PATTERNS
            .iter()
            .map(|p| p.to_string())
            .collect();
        Self::compile(&patterns).expect("default patterns compile")
    }

    /// Load a pattern set from a JSON array of strings.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| DocstitchError::io(path, source))?;
        let raw: Vec<String> = serde_json::from_str(&content).map_err(|err| {
            DocstitchError::config(format!("failed to parse {}: {err}", path.display()))
        })?;
        Self::compile(&raw)
    }

    /// Byte length of the longest pattern match anchored at the start of
    /// `title`, if any pattern matches there.
    fn longest_match(&self, title: &str) -> Option<usize> {
        let mut best = 0;
        for regex in &self.patterns {
            if let Some(found) = regex.find(title) {
                if found.start() == 0 && found.len() > best {
                    best = found.len();
                }
            }
        }
        (best > 0).then_some(best)
    }
}

/// Strip recognized serials from every heading title outside code. Heading
/// lines are rebuilt in canonical `hashes title` form; all other lines pass
/// through untouched.
pub fn strip_title_serials(lines: &[String], patterns: &StripPatterns) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut in_fence = false;
    for line in lines {
        if is_blank(line) || indent_width(line) >= INDENTED_CODE_COLUMNS {
            out.push(line.clone());
            continue;
        }
        let stripped = line.trim_start();
        if stripped.starts_with(FENCE_MARKER) {
            in_fence = !in_fence;
            out.push(line.clone());
            continue;
        }
        if in_fence {
            out.push(line.clone());
            continue;
        }
        let Some(caps) = HEADING_RE.captures(stripped) else {
            out.push(line.clone());
            continue;
        };
        let hashes = &caps[1];
        let title = caps[2].trim();
        let rest = match patterns.longest_match(title) {
            Some(len) => {
                debug!(serial = &title[..len], title, "stripped title serial");
                title[len..].trim_start()
            }
            None => title,
        };
        out.push(format!("{hashes} {rest}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(text: &str) -> String {
        let lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
        strip_title_serials(&lines, &StripPatterns::defaults()).concat()
    }

    #[test]
    fn dotted_decimal_serials_are_removed() {
        assert_eq!(strip("# 1.2.3. Introduction\n"), "# Introduction\n");
        assert_eq!(strip("## 2.1 Setup\n"), "## Setup\n");
    }

    #[test]
    fn plain_decimal_serials_are_removed() {
        assert_eq!(strip("# 42 Answers\n"), "# Answers\n");
    }

    #[test]
    fn chinese_chapter_markers_are_removed() {
        assert_eq!(strip("# 第一章 概述\n"), "# 概述\n");
        assert_eq!(strip("## 第十二节 细节\n"), "## 细节\n");
    }

    #[test]
    fn bracketed_serials_are_removed() {
        assert_eq!(strip("### (a) Variants\n"), "### Variants\n");
        assert_eq!(strip("### [3] Notes\n"), "### Notes\n");
    }

    #[test]
    fn unmatched_titles_are_kept() {
        assert_eq!(strip("# Introduction\n"), "# Introduction\n");
    }

    #[test]
    fn longest_match_wins() {
        // "1." matches both decimal patterns; the dotted pattern consumes
        // more of "1.2." and wins.
        assert_eq!(strip("# 1.2. Title\n"), "# Title\n");
    }

    #[test]
    fn code_blocks_are_untouched() {
        let text = "```\n# 1. kept\n```\n    # 2. kept\n";
        assert_eq!(strip(text), text);
    }

    #[test]
    fn non_heading_lines_pass_through() {
        assert_eq!(strip("1. a list item\n"), "1. a list item\n");
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = StripPatterns::compile(&["(unclosed".to_string()]).unwrap_err();
        assert!(matches!(err, DocstitchError::Pattern { .. }));
    }
}
