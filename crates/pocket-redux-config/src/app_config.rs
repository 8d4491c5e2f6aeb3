//! Application configuration
//!
//! Configuration loaded from `.pocket-redux.toml`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Demo configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Delay before a deferred increase/decrease is applied, in milliseconds
    #[serde(default = "default_async_delay_ms")]
    pub async_delay_ms: u64,

    /// Amount the vanilla counter moves per key press
    #[serde(default = "default_increase_step")]
    pub increase_step: i64,

    /// Log level override (error, warn, info, debug, trace); `RUST_LOG` is used when unset
    #[serde(default)]
    pub log_level: Option<String>,

    /// Show the action log panel
    #[serde(default = "default_show_log_panel")]
    pub show_log_panel: bool,
}

fn default_async_delay_ms() -> u64 {
    1000
}

fn default_increase_step() -> i64 {
    1
}

fn default_show_log_panel() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            async_delay_ms: default_async_delay_ms(),
            increase_step: default_increase_step(),
            log_level: None,
            show_log_panel: default_show_log_panel(),
        }
    }
}

impl AppConfig {
    /// Load config from the first config file found, or use defaults
    pub fn load() -> Self {
        match crate::load_config_file() {
            Some(content) => Self::parse(&content),
            None => {
                log::debug!("Using default app config");
                Self::default()
            }
        }
    }

    /// Parse config content, falling back to defaults on error
    pub fn parse(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => {
                log::info!("Loaded app config from file");
                config
            }
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                Self::default()
            }
        }
    }

    pub fn async_delay(&self) -> Duration {
        Duration::from_millis(self.async_delay_ms)
    }
}
