//! Shared error model, configuration, and i18n for Docstitch.
//!
//! This crate is the foundation depended on by all other Docstitch crates.
//! It provides:
//! - [`DocstitchError`] — the unified error type
//! - Configuration ([`AppConfig`], config loading)
//! - Translation-string lookup ([`Lang`], [`tr`])

pub mod config;
pub mod error;
pub mod i18n;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{DocstitchError, Result};
pub use i18n::{Lang, tr};
