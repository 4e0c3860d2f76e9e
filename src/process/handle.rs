use std::io::{self, Cursor, PipeReader, PipeWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use tokio::process::{Child, Command};
use tokio::runtime::Handle;

use crate::capture::{CaptureBuffer, CaptureReader, OnData, ReadInterrupt, ReadMode};
use crate::mvi::Reducer;

use super::cancel::CancelToken;
use super::lifecycle::{ProcessIntent, ProcessLifecycleReducer, ProcessState};

type AdvisoryWriter = Arc<Mutex<Option<PipeWriter>>>;

/// One `<shell> -c <command>` invocation.
///
/// The handle owns the child process and its output buffer; the input
/// buffer is only borrowed for the duration of a blocking reader. Handles are
/// never reused: replacing a command means killing one handle and starting
/// another.
pub struct ProcessHandle {
    command: String,
    output: CaptureBuffer,
    state: Arc<Mutex<ProcessState>>,
    /// Extra write-end of the output pipe, used for advisory text.
    advisory: AdvisoryWriter,
    cancel: CancelToken,
    /// Stops the thread copying the input buffer into the child's stdin.
    feed: Option<ReadInterrupt>,
    pid: Option<u32>,
}

struct Spawned {
    child: Child,
    output: PipeReader,
    advisory: PipeWriter,
    stdin: PipeWriter,
}

impl ProcessHandle {
    /// Launch `command` through `shell`, reading from `input`.
    ///
    /// Never blocks on the child and never fails: launch errors become the
    /// content of the output buffer. The child is supervised on `runtime`.
    pub fn start(
        runtime: &Handle,
        shell: &Path,
        command: &str,
        input: &CaptureBuffer,
        on_data: OnData,
    ) -> Self {
        let mut handle = Self {
            command: command.to_string(),
            output: CaptureBuffer::new(input.capacity()),
            state: Arc::new(Mutex::new(ProcessState::Starting)),
            advisory: Arc::new(Mutex::new(None)),
            cancel: CancelToken::new(),
            feed: None,
            pid: None,
        };

        let spawned = {
            let _enter = runtime.enter();
            spawn_child(shell, command)
        };
        let spawned = match spawned {
            Ok(spawned) => spawned,
            Err(err) => {
                tracing::warn!(
                    shell = %shell.display(),
                    command,
                    error = %err,
                    "failed to launch command"
                );
                handle.dispatch(ProcessIntent::LaunchFailed);
                let text = format!("up: {err}");
                handle
                    .output
                    .start_capturing(Cursor::new(text.into_bytes()), on_data);
                return handle;
            }
        };

        let Spawned {
            child,
            output,
            advisory,
            stdin,
        } = spawned;
        handle.pid = child.id();
        handle.output.start_capturing(output, on_data);
        *handle.advisory.lock() = Some(advisory);
        handle.dispatch(ProcessIntent::Launched);
        tracing::info!(pid = ?handle.pid, command, "command started");

        let reader = input.new_reader(ReadMode::Blocking);
        handle.feed = Some(reader.interrupter());
        spawn_feeder(reader, stdin);
        runtime.spawn(supervise(
            child,
            handle.cancel.clone(),
            Arc::clone(&handle.state),
            Arc::clone(&handle.advisory),
            handle.command.clone(),
        ));
        handle
    }

    /// Cancel the child's process group, stop feeding its stdin and close
    /// the advisory write-end.
    ///
    /// Idempotent and non-blocking; the output capture loop finishes on its
    /// own once every write-end of the pipe is closed.
    pub fn kill(&self) {
        if !self.cancel.cancel() {
            return;
        }
        self.dispatch(ProcessIntent::Cancelled);
        self.advisory.lock().take();
        if let Some(feed) = &self.feed {
            feed.interrupt();
        }
        tracing::debug!(pid = ?self.pid, command = %self.command, "command killed");
    }

    pub fn output(&self) -> &CaptureBuffer {
        &self.output
    }

    pub fn state(&self) -> ProcessState {
        *self.state.lock()
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// OS process id, if the child launched.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    fn dispatch(&self, intent: ProcessIntent) {
        dispatch(&self.state, intent);
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        self.kill();
    }
}

impl std::fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("command", &self.command)
            .field("pid", &self.pid)
            .field("state", &self.state())
            .finish()
    }
}

fn dispatch(state: &Mutex<ProcessState>, intent: ProcessIntent) {
    let mut state = state.lock();
    *state = ProcessLifecycleReducer::reduce(*state, intent);
}

fn spawn_child(shell: &Path, command: &str) -> io::Result<Spawned> {
    let (output, output_writer) = io::pipe()?;
    let (stdin_reader, stdin) = io::pipe()?;

    let mut cmd = Command::new(shell);
    cmd.arg("-c")
        .arg(command)
        .stdin(stdin_reader)
        .stdout(output_writer.try_clone()?)
        .stderr(output_writer.try_clone()?)
        .process_group(0)
        .kill_on_drop(true);
    let child = cmd.spawn()?;
    // `cmd` still holds our copies of the child's pipe ends; the output
    // reader only sees EOF once they are closed.
    drop(cmd);

    Ok(Spawned {
        child,
        output,
        advisory: output_writer,
        stdin,
    })
}

fn spawn_feeder(mut reader: CaptureReader, mut stdin: PipeWriter) {
    let spawned = thread::Builder::new()
        .name("stdin-feed".to_string())
        .spawn(move || match io::copy(&mut reader, &mut stdin) {
            Ok(bytes) => tracing::trace!(bytes, "stdin feed reached end of input"),
            Err(err) => tracing::debug!(error = %err, "stdin feed stopped"),
        });
    if let Err(err) = spawned {
        // The closure (and the pipe) is dropped, so the child sees EOF.
        tracing::warn!(error = %err, "failed to spawn stdin feeder");
    }
}

async fn supervise(
    mut child: Child,
    cancel: CancelToken,
    state: Arc<Mutex<ProcessState>>,
    advisory: AdvisoryWriter,
    command: String,
) {
    let status = tokio::select! {
        status = child.wait() => status,
        () = cancel.cancelled() => {
            // The shell may have forked; its descendants share the group.
            if let Some(pid) = child.id() {
                kill_group(pid);
            }
            if let Err(err) = child.kill().await {
                tracing::debug!(command = %command, error = %err, "kill failed");
            }
            child.wait().await
        }
    };

    match status {
        Ok(status) => {
            tracing::debug!(command = %command, %status, "command exited");
            dispatch(
                &state,
                ProcessIntent::Exited {
                    exit_code: status.code(),
                },
            );
            if !status.success() {
                write_advisory(&advisory, &format!("up: {status}\n"));
            }
        }
        Err(err) => {
            tracing::warn!(command = %command, error = %err, "waiting for command failed");
            dispatch(&state, ProcessIntent::Exited { exit_code: None });
            write_advisory(&advisory, &format!("up: {err}\n"));
        }
    }
    advisory.lock().take();
}

fn kill_group(pid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // SAFETY: killpg only sends a signal to the group led by our child.
    if unsafe { libc::killpg(pgid, libc::SIGKILL) } != 0 {
        tracing::debug!(pid, error = %io::Error::last_os_error(), "killpg failed");
    }
}

/// Append `text` to the output stream unless the handle was killed.
fn write_advisory(advisory: &Mutex<Option<PipeWriter>>, text: &str) {
    if let Some(writer) = advisory.lock().as_mut() {
        if let Err(err) = writer.write_all(text.as_bytes()) {
            tracing::debug!(error = %err, "failed to append exit status");
        }
    }
}
