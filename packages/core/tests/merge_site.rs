//! End-to-end pipeline tests over a docsify site built in a temp directory.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use docstitch_core::renumber::{LevelConfig, TitleStrategy, default_levels};
use docstitch_core::strip::StripPatterns;
use docstitch_core::{MergeOptions, SilentProgress, merge_site};
use docstitch_shared::DocstitchError;

fn write_site(root: &Path) {
    fs::write(
        root.join("_sidebar.md"),
        "- [Home](/)\n- [Guide](guide.md)\n    - [Setup](setup.md)\n    - [Usage](usage.md)\n",
    )
    .unwrap();
    fs::write(root.join("README.md"), "# 1. Welcome\n\nhello\n").unwrap();
    fs::write(
        root.join("setup.md"),
        "# Setup\n\n```sh\n# install\n```\n",
    )
    .unwrap();
    fs::write(
        root.join("usage.md"),
        "# 3.1 Usage\n\nsee [setup](setup.md) first\n",
    )
    .unwrap();
}

fn options(root: &Path) -> MergeOptions {
    MergeOptions {
        root: root.to_path_buf(),
        homepage: root.join("README.md"),
        patterns: StripPatterns::defaults(),
        levels: default_levels(),
        unconfigured: TitleStrategy::Normal,
        overflow: TitleStrategy::Cite,
    }
}

#[test]
fn merges_strips_and_renumbers_a_site() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_site(root);

    let outcome = merge_site(&options(root), &SilentProgress).unwrap();
    // Guide has children, so its own target is never loaded as a page.
    assert_eq!(outcome.page_count, 3);

    let text = outcome.lines.concat();
    // Old serials are gone, new hierarchical ones are in place.
    assert!(text.contains("# 1 Welcome\n"));
    // The Guide heading comes from the sidebar entry itself.
    assert!(text.contains("# 2 Guide\n"));
    // Nested pages are deepened before renumbering.
    assert!(text.contains("## 2.1 Setup\n"));
    assert!(text.contains("## 2.2 Usage\n"));
    // Internal links collapse to their text.
    assert!(text.contains("see setup first\n"));
    // Fenced code is untouched by every stage.
    assert!(text.contains("```sh\n# install\n```\n"));
}

#[test]
fn missing_homepage_fails_before_assembly() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_site(root);

    let mut opts = options(root);
    opts.homepage = root.join("nope.md");
    let err = merge_site(&opts, &SilentProgress).unwrap_err();
    assert!(matches!(err, DocstitchError::MissingPage { .. }));
}

#[test]
fn missing_root_fails() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_site(root);

    let mut opts = options(root);
    opts.root = root.join("absent");
    let err = merge_site(&opts, &SilentProgress).unwrap_err();
    assert!(matches!(err, DocstitchError::MissingRoot { .. }));
}

#[test]
fn custom_levels_change_the_numbering() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_site(root);

    let mut opts = options(root);
    opts.levels = vec![
        LevelConfig {
            remove_last_suffix: false,
            independent: true,
            ..LevelConfig::default()
        },
        LevelConfig::default(),
    ];
    let text = merge_site(&opts, &SilentProgress).unwrap().lines.concat();
    assert!(text.contains("# 2. Guide\n"));
    assert!(text.contains("## 2.1 Setup\n"));
}
