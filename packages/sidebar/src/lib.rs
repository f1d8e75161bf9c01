//! Docsify sidebar parser.
//!
//! Parses the indented outline in `_sidebar.md` into a tree of navigation
//! nodes. Each line is either a link item (`- [Name](target "title")`) or a
//! bare-text group item (`- Label`); every four columns of indentation add
//! one depth level.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Indentation columns per depth level.
const COLUMNS_PER_LEVEL: usize = 4;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One node of the navigation tree.
///
/// A node with children is a section contributing only a heading; a node
/// without children and with a target is a leaf whose referenced file
/// supplies content; a node with neither is rendered as a bare heading.
#[derive(Debug, Clone, Default)]
pub struct SidebarNode {
    /// Display text (heading title). `None` for the synthetic root and for
    /// malformed lines.
    pub name: Option<String>,
    /// Link target. `None` for grouping nodes.
    pub target: Option<String>,
    /// Ordered child nodes.
    pub children: Vec<SidebarNode>,
    /// 1-based nesting level; 0 for the synthetic root.
    pub depth: usize,
}

// ---------------------------------------------------------------------------
// Line pattern
// ---------------------------------------------------------------------------

/// Matches one outline line: either `- [name](link "title")` or `- label`.
static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^[ ]*- (?:\[(?P<name>.*)\]\([ ]*(?P<link>\S+)?(?:[ ]+["'](?P<title>.*)["'])?[ ]*\)|(?P<label>.*))[ ]*$"#,
    )
    .expect("valid regex")
});

/// Captured fields of one outline line.
struct ParsedItem {
    name: Option<String>,
    link: Option<String>,
    label: Option<String>,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse sidebar outline text into a navigation tree rooted at a synthetic
/// depth-0 node.
///
/// A link target that is absent, empty, or exactly `/` is replaced by
/// `homepage` — the convention for "this entry links to the site's home
/// document".
pub fn parse_sidebar(content: &str, homepage: &str) -> SidebarNode {
    // Ancestor stack: the node at stack index d sits at depth d.
    let mut stack: Vec<SidebarNode> = vec![SidebarNode::default()];

    for line in content.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let indentation = line.len() - line.trim_start().len();
        let depth = indentation / COLUMNS_PER_LEVEL + 1;

        // Attach completed subtrees until the stack top is this node's parent.
        while stack.len() > depth {
            pop_into_parent(&mut stack);
        }

        let item = parse_line(line);
        let node = build_node(item, depth, homepage);
        stack.push(node);
    }

    while stack.len() > 1 {
        pop_into_parent(&mut stack);
    }
    let root = stack.pop().unwrap_or_default();
    debug!(entries = root.children.len(), "sidebar parsed");
    root
}

fn pop_into_parent(stack: &mut Vec<SidebarNode>) {
    if let Some(node) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        }
    }
}

fn build_node(item: ParsedItem, depth: usize, homepage: &str) -> SidebarNode {
    // Bare-text items are grouping nodes with no target.
    if let Some(label) = item.label {
        return SidebarNode {
            name: Some(label),
            target: None,
            children: Vec::new(),
            depth,
        };
    }

    match item.name {
        Some(name) => {
            let target = match item.link.as_deref() {
                None | Some("") | Some("/") => homepage.to_string(),
                Some(link) => link.to_string(),
            };
            SidebarNode {
                name: Some(name),
                target: Some(target),
                children: Vec::new(),
                depth,
            }
        }
        // Malformed line: keep a placeholder node so sibling ordering and
        // depth bookkeeping stay intact.
        None => SidebarNode {
            name: None,
            target: None,
            children: Vec::new(),
            depth,
        },
    }
}

fn parse_line(line: &str) -> ParsedItem {
    let Some(caps) = ITEM_RE.captures(line.trim_start()) else {
        return ParsedItem {
            name: None,
            link: None,
            label: None,
        };
    };

    ParsedItem {
        name: caps.name("name").map(|m| unescape(m.as_str())),
        link: caps.name("link").map(|m| m.as_str().to_string()),
        label: caps.name("label").map(|m| m.as_str().to_string()),
    }
}

/// Unescape `\\`, `\[`, and `\]` inside a captured display name.
fn unescape(name: &str) -> String {
    name.replace("\\\\", "\\")
        .replace("\\[", "[")
        .replace("\\]", "]")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "/site/README.md";

    #[test]
    fn nested_links_build_a_tree() {
        let root = parse_sidebar("- [A](/a.md)\n    - [B](/b.md)\n", HOME);

        assert_eq!(root.depth, 0);
        assert_eq!(root.children.len(), 1);

        let a = &root.children[0];
        assert_eq!(a.name.as_deref(), Some("A"));
        assert_eq!(a.target.as_deref(), Some("/a.md"));
        assert_eq!(a.depth, 1);
        assert_eq!(a.children.len(), 1);

        let b = &a.children[0];
        assert_eq!(b.name.as_deref(), Some("B"));
        assert_eq!(b.target.as_deref(), Some("/b.md"));
        assert_eq!(b.depth, 2);
        assert!(b.children.is_empty());
    }

    #[test]
    fn siblings_stay_ordered() {
        let outline = "- [A](a.md)\n- [B](b.md)\n- [C](c.md)\n";
        let root = parse_sidebar(outline, HOME);
        let names: Vec<_> = root
            .children
            .iter()
            .map(|n| n.name.clone().unwrap())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn homepage_substitution() {
        let root = parse_sidebar("- [Home](/)\n- [Also home]()\n", HOME);
        assert_eq!(root.children[0].target.as_deref(), Some(HOME));
        assert_eq!(root.children[1].target.as_deref(), Some(HOME));
    }

    #[test]
    fn bare_text_becomes_grouping_node() {
        let root = parse_sidebar("- Guides\n    - [Intro](intro.md)\n", HOME);
        let group = &root.children[0];
        assert_eq!(group.name.as_deref(), Some("Guides"));
        assert!(group.target.is_none());
        assert_eq!(group.children.len(), 1);
    }

    #[test]
    fn link_title_is_ignored() {
        let root = parse_sidebar("- [Intro](intro.md \"The intro\")\n", HOME);
        let node = &root.children[0];
        assert_eq!(node.name.as_deref(), Some("Intro"));
        assert_eq!(node.target.as_deref(), Some("intro.md"));
    }

    #[test]
    fn escaped_brackets_in_names() {
        let root = parse_sidebar(r"- [\[draft\] Notes](notes.md)", HOME);
        assert_eq!(root.children[0].name.as_deref(), Some("[draft] Notes"));

        let root = parse_sidebar(r"- [Back\\slash](b.md)", HOME);
        assert_eq!(root.children[0].name.as_deref(), Some("Back\\slash"));
    }

    #[test]
    fn dedent_pops_back_to_shallower_parent() {
        let outline = "\
- [A](a.md)
    - [B](b.md)
        - [C](c.md)
    - [D](d.md)
- [E](e.md)
";
        let root = parse_sidebar(outline, HOME);
        assert_eq!(root.children.len(), 2);

        let a = &root.children[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].name.as_deref(), Some("B"));
        assert_eq!(a.children[0].children[0].name.as_deref(), Some("C"));
        assert_eq!(a.children[1].name.as_deref(), Some("D"));

        assert_eq!(root.children[1].name.as_deref(), Some("E"));
    }

    #[test]
    fn malformed_indentation_divides_down() {
        // 6 columns is not a multiple of 4; integer division maps it to depth 2.
        let outline = "- [A](a.md)\n      - [B](b.md)\n";
        let root = parse_sidebar(outline, HOME);
        let b = &root.children[0].children[0];
        assert_eq!(b.name.as_deref(), Some("B"));
        assert_eq!(b.depth, 2);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let root = parse_sidebar("- [A](a.md)\n\n- [B](b.md)\n", HOME);
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn unparseable_line_yields_placeholder_node() {
        let root = parse_sidebar("not an item\n", HOME);
        assert_eq!(root.children.len(), 1);
        assert!(root.children[0].name.is_none());
        assert!(root.children[0].target.is_none());
    }
}
