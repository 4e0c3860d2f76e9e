use serde::{Deserialize, Serialize};

use crate::capture::DEFAULT_CAPACITY;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub execution: ExecutionConfig,
    pub logging: LoggingConfig,
}

/// Capture buffer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Maximum bytes held by each capture buffer (default: 40 MiB).
    #[serde(default = "default_capacity_bytes")]
    pub capacity_bytes: u64,
}

/// Command execution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExecutionConfig {
    /// Run the command line on every edit (default: false).
    #[serde(default)]
    pub unsafe_full_throttle: bool,
}

/// Diagnostic log settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write the diagnostic log (default: false).
    #[serde(default)]
    pub debug: bool,
    /// Log file path, relative to the working directory (default: "up.debug").
    #[serde(default = "default_log_path")]
    pub path: String,
    /// `tracing` filter directive (default: "debug").
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_capacity_bytes() -> u64 {
    DEFAULT_CAPACITY as u64
}

fn default_log_path() -> String {
    "up.debug".to_string()
}

fn default_log_filter() -> String {
    "debug".to_string()
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            capacity_bytes: default_capacity_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            path: default_log_path(),
            filter: default_log_filter(),
        }
    }
}
