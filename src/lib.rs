//! Momo Config Library
//!
//! Resolves the momo plugin configuration from environment variables,
//! project and global `.jsonc` files, and defaults, recording which source
//! supplied every field.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;

pub use config::{Resolution, ResolvedConfig, load_config, resolve_config};
pub use error::{ConfigError, ConfigResult};
