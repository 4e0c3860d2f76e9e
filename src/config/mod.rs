mod loader;
mod settings;
mod types;

pub use loader::ConfigError;
pub use settings::{LogSettings, Settings};
pub use types::{CaptureConfig, Config, ExecutionConfig, LoggingConfig};
