use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogSettings;
use crate::error::StartupError;

/// Environment variable overriding the configured filter directive.
pub const LOG_ENV: &str = "UP_LOG";

/// Initialize tracing with file output.
///
/// Logging is disabled unless requested: the TUI owns the terminal, so
/// nothing is ever written to stdout or stderr. Returns whether a subscriber
/// was installed.
pub fn init(settings: &LogSettings) -> Result<bool, StartupError> {
    if !settings.enabled {
        return Ok(false);
    }

    let file = File::create(&settings.path).map_err(|source| StartupError::LogFile {
        path: settings.path.clone(),
        source,
    })?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|err| StartupError::Logging(err.to_string()))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "up starting");
    Ok(true)
}
