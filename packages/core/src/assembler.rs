//! Document assembly: walk the sidebar tree, load each referenced page,
//! deepen its headings to match its nesting depth, and strip links that
//! point inside the site.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, info, instrument};

use docstitch_shared::{DocstitchError, Result};
use docstitch_sidebar::{SidebarNode, parse_sidebar};

use crate::lines::{FENCE_MARKER, INDENTED_CODE_COLUMNS, indent_width, is_blank, split_keepends};

/// Docsify outline file expected at the site root.
pub const SIDEBAR_FILE_NAME: &str = "_sidebar.md";

/// Result of flattening a site into a single document.
#[derive(Debug)]
pub struct MergedDocument {
    pub lines: Vec<String>,
    pub page_count: usize,
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Parse the sidebar under `root_path` and flatten the whole site into one
/// document, depth-first in outline order.
#[instrument(skip_all, fields(root = %root_path.display()))]
pub fn merge(root_path: &Path, homepage: &Path) -> Result<MergedDocument> {
    if !root_path.exists() {
        return Err(DocstitchError::MissingRoot {
            path: root_path.to_path_buf(),
        });
    }
    let sidebar_path = root_path.join(SIDEBAR_FILE_NAME);
    if !sidebar_path.exists() {
        return Err(DocstitchError::MissingSidebar { path: sidebar_path });
    }
    let outline = fs::read_to_string(&sidebar_path)
        .map_err(|source| DocstitchError::io(&sidebar_path, source))?;
    let tree = parse_sidebar(&outline, &homepage.to_string_lossy());

    let mut page_count = 0;
    let text = assemble(&tree, root_path, &mut page_count)?;
    info!(pages = page_count, "site assembled");
    Ok(MergedDocument {
        lines: split_keepends(&text),
        page_count,
    })
}

fn assemble(node: &SidebarNode, root_path: &Path, pages: &mut usize) -> Result<String> {
    let name = node.name.as_deref().unwrap_or("");

    if !node.children.is_empty() {
        let mut out = String::new();
        if node.depth > 0 {
            out.push_str(&format!("{} {name}\n\n", "#".repeat(node.depth)));
        }
        for child in &node.children {
            out.push_str(&assemble(child, root_path, pages)?);
            out.push('\n');
        }
        return Ok(out);
    }

    if node.depth == 0 {
        // Empty sidebar: nothing to merge.
        return Ok(String::new());
    }

    let Some(target) = node.target.as_deref() else {
        // Grouping entry without a page of its own.
        return Ok(format!("{} {name}\n", "#".repeat(node.depth)));
    };

    let path = resolve_target(root_path, target);
    if !path.exists() {
        return Err(DocstitchError::MissingPage { path });
    }
    debug!(page = %path.display(), depth = node.depth, "merging page");
    let content = fs::read_to_string(&path).map_err(|source| DocstitchError::io(&path, source))?;
    let deepened = deepen_headings(&split_keepends(&content), node.depth);
    let body = strip_internal_links(&deepened.concat());
    *pages += 1;
    Ok(format!("{body}\n"))
}

/// Resolve a sidebar target against the site root. Absolute paths are kept
/// as-is when they exist on disk; otherwise a leading slash is read the
/// docsify way, as relative to the site root.
fn resolve_target(root_path: &Path, target: &str) -> PathBuf {
    let path = Path::new(target);
    if path.is_absolute() {
        if path.exists() {
            return path.to_path_buf();
        }
        let joined = root_path.join(target.trim_start_matches(['/', '\\']));
        if joined.exists() {
            return joined;
        }
        return path.to_path_buf();
    }
    root_path.join(path)
}

// ---------------------------------------------------------------------------
// Heading depth
// ---------------------------------------------------------------------------

/// Prepend `depth - 1` hashes to every heading line outside code, so a page
/// nested at `depth` starts its headings at that level.
fn deepen_headings(lines: &[String], depth: usize) -> Vec<String> {
    let extra = depth.saturating_sub(1);
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
        if !in_fence && stripped.starts_with('#') {
            let ws = indent_width(line);
            out.push(format!("{}{}{}", &line[..ws], "#".repeat(extra), &line[ws..]));
        } else {
            out.push(line.clone());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Link stripping
// ---------------------------------------------------------------------------

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)\[(?P<description>(?:\\[\[\]]|[^\[\]])*)\]\(\s*(?P<url>[^\s)]+)?(?:\s+["'](?P<title>.*?)["'])?\s*\)"#,
    )
    .expect("valid regex")
});

/// Replace site-internal links with their description text. External links
/// (http/https) are kept, rewritten in canonical form.
fn strip_internal_links(text: &str) -> String {
    LINK_RE
        .replace_all(text, |caps: &Captures| {
            let description = &caps["description"];
            let url = caps.name("url").map(|m| m.as_str());
            match url {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                    match caps.name("title") {
                        Some(title) => format!("[{description}]({url} \"{}\")", title.as_str()),
                        None => format!("[{description}]({url})"),
                    }
                }
                _ => {
                    debug!(link = %&caps[0], "dropped internal link");
                    description.to_string()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn lines(text: &str) -> Vec<String> {
        split_keepends(text)
    }

    #[test]
    fn deepen_rewrites_headings_to_node_depth() {
        let input = lines("# Top\n\ntext\n\n## Sub\n");
        let out = deepen_headings(&input, 3);
        assert_eq!(out.concat(), "### Top\n\ntext\n\n#### Sub\n");
    }

    #[test]
    fn deepen_at_depth_one_is_identity() {
        let input = lines("# Top\n## Sub\n");
        assert_eq!(deepen_headings(&input, 1), input);
    }

    #[test]
    fn deepen_skips_fenced_code() {
        let input = lines("# Top\n```sh\n# a comment\n```\n# Tail\n");
        let out = deepen_headings(&input, 2);
        assert_eq!(out.concat(), "## Top\n```sh\n# a comment\n```\n## Tail\n");
    }

    #[test]
    fn deepen_skips_indented_code() {
        let input = lines("    # not a heading\n");
        assert_eq!(deepen_headings(&input, 4), input);
    }

    #[test]
    fn internal_links_collapse_to_description() {
        let out = strip_internal_links("see [the intro](intro.md) for details");
        assert_eq!(out, "see the intro for details");
    }

    #[test]
    fn external_links_survive_with_title() {
        let out = strip_internal_links(r#"[docs](https://example.com/a 'the docs')"#);
        assert_eq!(out, "[docs](https://example.com/a \"the docs\")");
        let out = strip_internal_links("[docs](http://example.com)");
        assert_eq!(out, "[docs](http://example.com)");
    }

    #[test]
    fn empty_target_links_collapse() {
        assert_eq!(strip_internal_links("[label]()"), "label");
    }

    #[test]
    fn merge_walks_sidebar_depth_first() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("_sidebar.md"),
            "- [Guide](guide.md)\n    - [Setup](setup.md)\n",
        )
        .unwrap();
        fs::write(root.join("guide.md"), "# Guide\n\nintro\n").unwrap();
        fs::write(root.join("setup.md"), "# Setup\n\nsteps\n").unwrap();

        let merged = merge(root, Path::new("README.md")).unwrap();
        assert_eq!(merged.page_count, 2);
        let text = merged.lines.concat();
        assert_eq!(text, "# Guide\n\nintro\n\n## Setup\n\nsteps\n\n");
    }

    #[test]
    fn merge_emits_headings_for_grouping_entries() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("_sidebar.md"),
            "- Part One\n    - [Setup](setup.md)\n",
        )
        .unwrap();
        fs::write(root.join("setup.md"), "# Setup\n").unwrap();

        let merged = merge(root, Path::new("README.md")).unwrap();
        let text = merged.lines.concat();
        assert!(text.starts_with("# Part One\n\n"));
        assert!(text.contains("## Setup\n"));
    }

    #[test]
    fn merge_reports_missing_page() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("_sidebar.md"), "- [Gone](gone.md)\n").unwrap();

        let err = merge(root, Path::new("README.md")).unwrap_err();
        assert!(matches!(err, DocstitchError::MissingPage { .. }));
    }

    #[test]
    fn merge_reports_missing_sidebar() {
        let dir = tempdir().unwrap();
        let err = merge(dir.path(), Path::new("README.md")).unwrap_err();
        assert!(matches!(err, DocstitchError::MissingSidebar { .. }));
    }

    #[test]
    fn slash_targets_resolve_against_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("guide")).unwrap();
        fs::write(root.join("_sidebar.md"), "- [Intro](/guide/intro.md)\n").unwrap();
        fs::write(root.join("guide/intro.md"), "# Intro\n").unwrap();

        let merged = merge(root, Path::new("README.md")).unwrap();
        assert_eq!(merged.lines.concat(), "# Intro\n\n");
    }

    #[test]
    fn bare_slash_target_falls_back_to_homepage() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let homepage = root.join("README.md");
        fs::write(root.join("_sidebar.md"), "- [Home](/)\n").unwrap();
        fs::write(&homepage, "# Home\n\nwelcome\n").unwrap();

        let merged = merge(root, &homepage).unwrap();
        assert_eq!(merged.lines.concat(), "# Home\n\nwelcome\n\n");
    }
}
