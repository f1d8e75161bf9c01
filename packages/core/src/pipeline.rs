//! End-to-end merge pipeline: parse the sidebar, assemble the site into one
//! document, strip old heading serials, and renumber.

use std::fs;
use std::path::PathBuf;

use tracing::{info, instrument};

use docstitch_shared::{DocstitchError, Result};

use crate::assembler;
use crate::renumber::{self, LevelConfig, TitleStrategy};
use crate::strip::{self, StripPatterns};

/// Everything the pipeline needs, resolved up front by the caller.
#[derive(Debug)]
pub struct MergeOptions {
    /// Site root containing `_sidebar.md` and the pages.
    pub root: PathBuf,
    /// Page substituted for bare `/` and empty sidebar targets.
    pub homepage: PathBuf,
    /// Serial patterns to strip from existing headings.
    pub patterns: StripPatterns,
    /// Per-level numbering scheme, outermost level first.
    pub levels: Vec<LevelConfig>,
    /// Applied to headings deeper than the configured levels.
    pub unconfigured: TitleStrategy,
    /// Applied to headings deeper than markdown allows.
    pub overflow: TitleStrategy,
}

/// Final merged document.
#[derive(Debug)]
pub struct MergeOutcome {
    pub lines: Vec<String>,
    pub page_count: usize,
}

/// Phase-level progress feedback for long merges.
pub trait ProgressReporter {
    fn phase(&self, name: &str);
    fn done(&self);
}

/// Reporter that swallows all progress events.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self) {}
}

/// Run the whole merge pipeline over a docsify site.
#[instrument(skip_all, fields(root = %options.root.display()))]
pub fn merge_site(
    options: &MergeOptions,
    progress: &dyn ProgressReporter,
) -> Result<MergeOutcome> {
    if !options.homepage.exists() {
        return Err(DocstitchError::MissingPage {
            path: options.homepage.clone(),
        });
    }
    // Absolute homepage path, so `/` sidebar targets resolve no matter what
    // the docs root is relative to.
    let homepage = fs::canonicalize(&options.homepage)
        .map_err(|source| DocstitchError::io(&options.homepage, source))?;

    progress.phase("Merging pages");
    let merged = assembler::merge(&options.root, &homepage)?;

    progress.phase("Stripping old numbering");
    let stripped = strip::strip_title_serials(&merged.lines, &options.patterns);

    progress.phase("Renumbering headings");
    let lines = renumber::renumber_titles(
        &stripped,
        &options.levels,
        options.unconfigured,
        options.overflow,
    )?;

    progress.done();
    info!(
        pages = merged.page_count,
        lines = lines.len(),
        "merge complete"
    );
    Ok(MergeOutcome {
        lines,
        page_count: merged.page_count,
    })
}
