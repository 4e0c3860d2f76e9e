use std::path::PathBuf;

use crate::args::Cli;
use crate::config::types::Config;
use crate::pipeline::ExecutionMode;

/// Effective diagnostic log settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub enabled: bool,
    pub path: PathBuf,
    pub filter: String,
}

/// Immutable session settings: the config file overlaid with CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub capacity: usize,
    pub mode: ExecutionMode,
    pub output_script: Option<PathBuf>,
    pub log: LogSettings,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let capacity = cli.buffer_size.unwrap_or(config.capture.capacity_bytes);
        let unsafe_mode = cli.unsafe_full_throttle || config.execution.unsafe_full_throttle;

        Self {
            capacity: usize::try_from(capacity).unwrap_or(usize::MAX),
            mode: if unsafe_mode {
                ExecutionMode::Unsafe
            } else {
                ExecutionMode::Safe
            },
            output_script: cli.output_script.clone(),
            log: LogSettings {
                enabled: cli.debug || config.logging.debug,
                path: PathBuf::from(config.logging.path),
                filter: config.logging.filter,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_safe_and_quiet() {
        let settings = Settings::resolve(&Cli::default(), Config::default());
        assert_eq!(settings.mode, ExecutionMode::Safe);
        assert_eq!(settings.capacity, crate::capture::DEFAULT_CAPACITY);
        assert!(!settings.log.enabled);
        assert_eq!(settings.log.path, PathBuf::from("up.debug"));
        assert_eq!(settings.output_script, None);
    }

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli {
            unsafe_full_throttle: true,
            debug: true,
            buffer_size: Some(64),
            output_script: Some(PathBuf::from("x.sh")),
            config: None,
        };
        let mut config = Config::default();
        config.capture.capacity_bytes = 1024;

        let settings = Settings::resolve(&cli, config);
        assert_eq!(settings.mode, ExecutionMode::Unsafe);
        assert_eq!(settings.capacity, 64);
        assert!(settings.log.enabled);
        assert_eq!(settings.output_script, Some(PathBuf::from("x.sh")));
    }

    #[test]
    fn config_enables_features_without_flags() {
        let mut config = Config::default();
        config.execution.unsafe_full_throttle = true;
        config.logging.debug = true;
        config.logging.path = "/tmp/up.log".to_string();

        let settings = Settings::resolve(&Cli::default(), config);
        assert_eq!(settings.mode, ExecutionMode::Unsafe);
        assert!(settings.log.enabled);
        assert_eq!(settings.log.path, PathBuf::from("/tmp/up.log"));
    }
}
