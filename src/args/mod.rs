//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

/// Ultimate Plumber: build shell pipelines interactively over captured input.
///
/// Pipe something in (`command | up`) and type a pipeline; its output is
/// rendered live over the captured standard input.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "up")]
#[command(version)]
pub struct Cli {
    /// Run the command line on every keystroke instead of waiting for Enter.
    ///
    /// Dangerous: partially typed commands like `rm` are executed as-is.
    #[arg(long)]
    pub unsafe_full_throttle: bool,

    /// Save the command line to FILE on Ctrl-X instead of ./upN.sh
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output_script: Option<PathBuf>,

    /// Write a diagnostic log (up.debug unless configured otherwise)
    #[arg(long)]
    pub debug: bool,

    /// Maximum number of bytes captured per buffer
    #[arg(long, value_name = "BYTES", value_parser = clap::value_parser!(u64).range(1..))]
    pub buffer_size: Option<u64>,

    /// Read configuration from FILE instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
