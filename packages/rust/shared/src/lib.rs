//! Shared error model and configuration for Minty.
//!
//! This crate is the foundation depended on by all other Minty crates.
//! It provides:
//! - [`MintyError`] — the unified error type
//! - Configuration ([`AppConfig`], [`StoreConfig`], config loading)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, StoreConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{MintyError, Result};
