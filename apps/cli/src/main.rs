//! Docstitch CLI — stitch a docsify site into one Markdown document.
//!
//! Flattens the site's `_sidebar.md` outline into a single file with
//! consistently renumbered headings.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
