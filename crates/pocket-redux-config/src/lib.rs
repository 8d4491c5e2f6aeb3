//! Configuration and file management for pocket-redux-demo
//!
//! This crate provides:
//! - Platform directories for config and log files
//! - Configuration file lookup (TOML)
//! - Demo configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
pub use paths::{cache_dir, config_dir};
