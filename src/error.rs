use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::shell::ShellError;

/// Failures that abort `up` before the interactive loop starts.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("up requires some data piped on standard input, e.g. try: `echo hello world | up`")]
    InteractiveInput,

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot create log file '{path}': {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot install log subscriber: {0}")]
    Logging(String),

    #[error("cannot initialize terminal: {0}")]
    Terminal(#[source] io::Error),
}
