//! Docstitch core: flattens a docsify site into a single Markdown document.
//!
//! The pipeline has three stages. [`assembler`] walks the parsed sidebar
//! tree, loading each page, deepening its headings to the page's nesting
//! depth, and stripping site-internal links. [`strip`] removes pre-existing
//! serial numbers from heading titles. [`renumber`] prepends freshly
//! computed hierarchical serials. [`pipeline`] wires the stages together
//! behind a single entry point.

pub mod assembler;
mod lines;
pub mod pipeline;
pub mod renumber;
pub mod strip;

pub use pipeline::{MergeOptions, MergeOutcome, ProgressReporter, SilentProgress, merge_site};
