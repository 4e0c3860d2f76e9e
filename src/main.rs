use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use up::args::Cli;
use up::config::{Config, Settings};
use up::error::StartupError;
use up::script::{save_script, ScriptTarget};
use up::shell::resolve_shell;
use up::ui::app::SessionEnd;
use up::ui::runtime::{run as run_ui, SessionOutcome};

const BANNER: &str = concat!(
    "up: Ultimate Plumber v",
    env!("CARGO_PKG_VERSION"),
    " https://github.com/akavel/up"
);

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(StartupError::from)?;
    let settings = Settings::resolve(&cli, config);
    up::logging::init(&settings.log)?;

    if io::stdin().is_terminal() {
        return Err(StartupError::InteractiveInput.into());
    }
    let shell = resolve_shell().map_err(StartupError::from)?;
    tracing::info!(shell = %shell.display(), "using shell");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("cannot start async runtime")?;

    let outcome = run_ui(&settings, shell.clone(), runtime.handle().clone())
        .map_err(StartupError::Terminal)?;
    runtime.shutdown_timeout(Duration::from_millis(200));

    finish(&outcome, &shell, &settings);
    Ok(())
}

fn finish(outcome: &SessionOutcome, shell: &std::path::Path, settings: &Settings) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{BANNER}");
    match outcome.end {
        SessionEnd::SaveScript => {
            let target = ScriptTarget::new(settings.output_script.clone());
            save_script(shell, &outcome.command, &target, &mut stderr);
        }
        SessionEnd::Quit | SessionEnd::Terminated => {
            let _ = writeln!(stderr, "up: | {}", outcome.command);
        }
    }
}
