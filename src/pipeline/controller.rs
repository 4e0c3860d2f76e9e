use std::path::{Path, PathBuf};

use tokio::runtime::Handle;

use crate::capture::{CaptureBuffer, OnData};
use crate::process::ProcessHandle;

/// When edits to the command line are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Run only on explicit confirmation.
    #[default]
    Safe,
    /// Run on every change of the command text.
    Unsafe,
}

/// Decide whether the pipeline stage has to be restarted.
pub fn should_restart(
    mode: ExecutionMode,
    restart_requested: bool,
    command: &str,
    last_executed: &str,
) -> bool {
    restart_requested || (mode == ExecutionMode::Unsafe && command != last_executed)
}

/// Keeps "what runs" and "what is displayed" in sync with the command text.
///
/// Invariant: `displayed` is either the root buffer (no command) or the
/// output buffer of `current`.
pub struct PipelineController {
    mode: ExecutionMode,
    shell: PathBuf,
    runtime: Handle,
    on_data: OnData,
    root: CaptureBuffer,
    displayed: CaptureBuffer,
    current: Option<ProcessHandle>,
    last_executed: String,
    restart_requested: bool,
}

impl PipelineController {
    pub fn new(
        mode: ExecutionMode,
        shell: PathBuf,
        root: CaptureBuffer,
        runtime: Handle,
        on_data: OnData,
    ) -> Self {
        Self {
            mode,
            shell,
            runtime,
            on_data,
            displayed: root.clone(),
            root,
            current: None,
            last_executed: String::new(),
            restart_requested: false,
        }
    }

    /// Bring the running stage in line with `command`.
    ///
    /// Returns whether a restart happened.
    pub fn evaluate(&mut self, command: &str) -> bool {
        if !should_restart(
            self.mode,
            self.restart_requested,
            command,
            &self.last_executed,
        ) {
            return false;
        }

        if let Some(previous) = self.current.take() {
            previous.kill();
        }
        if command.is_empty() {
            self.displayed = self.root.clone();
            tracing::debug!("command cleared; showing raw input");
        } else {
            let handle = ProcessHandle::start(
                &self.runtime,
                &self.shell,
                command,
                &self.root,
                self.on_data.clone(),
            );
            self.displayed = handle.output().clone();
            self.current = Some(handle);
        }
        self.restart_requested = false;
        self.last_executed = command.to_string();
        true
    }

    /// Explicit confirmation: restart on the next evaluation.
    pub fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    /// Freeze growth of the root buffer.
    pub fn pause_input(&mut self) -> bool {
        let changed = self.root.set_paused(true);
        if changed {
            tracing::info!(committed = self.root.len(), "input paused");
        }
        changed
    }

    /// Resume the root buffer and rerun the current command against the
    /// extended input.
    pub fn resume_input(&mut self) -> bool {
        let changed = self.root.set_paused(false);
        if changed {
            tracing::info!("input resumed");
        }
        self.restart_requested = true;
        changed
    }

    pub fn is_input_paused(&self) -> bool {
        self.root.status() == crate::capture::CaptureStatus::Paused
    }

    /// Buffer the viewer should render.
    pub fn displayed(&self) -> &CaptureBuffer {
        &self.displayed
    }

    pub fn root(&self) -> &CaptureBuffer {
        &self.root
    }

    pub fn current(&self) -> Option<&ProcessHandle> {
        self.current.as_ref()
    }

    pub fn last_executed(&self) -> &str {
        &self.last_executed
    }

    /// True when `command` has edits that have not been executed yet.
    pub fn is_pending(&self, command: &str) -> bool {
        command != self.last_executed
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn shell(&self) -> &Path {
        &self.shell
    }

    /// Kill the running stage, if any.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.kill();
        }
    }
}
