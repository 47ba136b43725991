//! gcemit Settings Crate
//!
//! Handles configuration files: loading, validation and persistence.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, ConfigFormat, OutputSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
