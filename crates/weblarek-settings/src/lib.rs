//! Web-larek Settings Crate
//!
//! Handles application configuration files and their validation.

pub mod config;
pub mod error;

pub use config::{ApiSettings, Config, EventSettings, LoggingSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
