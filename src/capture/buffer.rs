use std::io::{self, Read};
use std::sync::Arc;
use std::thread;

use parking_lot::{Condvar, Mutex};

use super::reader::{CaptureReader, ReadMode};

/// Default capture capacity: 40 MiB.
pub const DEFAULT_CAPACITY: usize = 40 * 1024 * 1024;

/// Largest single read issued against the source.
const CHUNK_SIZE: usize = 64 * 1024;

/// Callback invoked after every committed read.
///
/// Called at high frequency from the capture thread; receivers must
/// coalesce.
pub type OnData = Arc<dyn Fn() + Send + Sync>;

/// Lifecycle of a capture buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus {
    /// Reading from the source (or waiting to be bound to one).
    Capturing,
    /// Growth frozen; blocking readers see end-of-stream.
    Paused,
    /// Source exhausted, failed, or capacity reached. Final.
    Complete,
}

/// Append-only byte store shared between one capture loop and many readers.
///
/// Cloning yields another handle to the same storage.
#[derive(Clone)]
pub struct CaptureBuffer {
    shared: Arc<Shared>,
}

pub(super) struct Shared {
    pub(super) capacity: usize,
    pub(super) state: Mutex<State>,
    pub(super) cond: Condvar,
}

pub(super) struct State {
    /// Committed bytes; `bytes.len()` is the committed length `n`.
    ///
    /// Reserved up front so a commit never moves what readers copy from.
    pub(super) bytes: Vec<u8>,
    pub(super) status: CaptureStatus,
    /// Bumped on every transition into `Paused`.
    pub(super) pause_epoch: u64,
    newlines: usize,
    bound: bool,
}

impl State {
    fn new(capacity: usize) -> Self {
        let mut bytes = Vec::new();
        if let Err(err) = bytes.try_reserve_exact(capacity) {
            tracing::warn!(capacity, error = %err, "cannot reserve capture storage; growing on demand");
        }
        Self {
            bytes,
            status: CaptureStatus::Capturing,
            pause_epoch: 0,
            newlines: 0,
            bound: false,
        }
    }

    /// Append `chunk`, which holds `newlines` newline bytes.
    fn commit(&mut self, chunk: &[u8], newlines: usize) {
        self.newlines += newlines;
        self.bytes.extend_from_slice(chunk);
    }
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

impl CaptureBuffer {
    /// Create an empty buffer that will hold at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                capacity,
                state: Mutex::new(State::new(capacity)),
                cond: Condvar::new(),
            }),
        }
    }

    /// Bind the buffer to `source` and start the background capture loop.
    ///
    /// `on_data` runs after every successful read and once more when the
    /// buffer completes. A buffer can be bound only once; later calls are
    /// ignored.
    pub fn start_capturing<R>(&self, source: R, on_data: OnData) -> Self
    where
        R: Read + Send + 'static,
    {
        {
            let mut state = self.shared.state.lock();
            if state.bound {
                tracing::warn!("capture buffer already bound to a source; ignoring");
                return self.clone();
            }
            state.bound = true;
        }

        let shared = Arc::clone(&self.shared);
        let notify = Arc::clone(&on_data);
        let spawned = thread::Builder::new()
            .name("capture".to_string())
            .spawn(move || capture_loop(shared, source, notify));
        if let Err(err) = spawned {
            tracing::error!(error = %err, "failed to spawn capture thread");
            let mut state = self.shared.state.lock();
            append_truncated(&mut state, self.shared.capacity, &failure_text("capture", &err));
            state.status = CaptureStatus::Complete;
            self.shared.cond.notify_all();
            drop(state);
            on_data();
        }
        self.clone()
    }

    /// Pause (`true`) or resume (`false`) capturing.
    ///
    /// Pausing wakes blocking readers so they report end-of-stream; resuming
    /// wakes the capture loop. Returns whether the status changed.
    pub fn set_paused(&self, pause: bool) -> bool {
        let mut state = self.shared.state.lock();
        let next = match (pause, state.status) {
            (true, CaptureStatus::Capturing) => CaptureStatus::Paused,
            (false, CaptureStatus::Paused) => CaptureStatus::Capturing,
            _ => return false,
        };
        state.status = next;
        if next == CaptureStatus::Paused {
            state.pause_epoch += 1;
        }
        self.shared.cond.notify_all();
        tracing::debug!(status = ?next, committed = state.bytes.len(), "capture pause toggled");
        true
    }

    /// Fresh cursor positioned at byte 0.
    pub fn new_reader(&self, mode: ReadMode) -> CaptureReader {
        CaptureReader::new(Arc::clone(&self.shared), mode)
    }

    pub fn status(&self) -> CaptureStatus {
        self.shared.state.lock().status
    }

    /// Committed length `n`.
    pub fn len(&self) -> usize {
        self.shared.state.lock().bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// True once the committed length has reached capacity.
    pub fn is_full(&self) -> bool {
        self.len() >= self.shared.capacity
    }

    /// Number of newline-delimited records committed so far.
    ///
    /// A trailing record without a terminating newline counts as one.
    pub fn line_count(&self) -> usize {
        let state = self.shared.state.lock();
        let partial = state.bytes.last().is_some_and(|&b| b != b'\n');
        state.newlines + usize::from(partial)
    }

    /// Copy of every committed byte.
    pub fn contents(&self) -> Vec<u8> {
        self.shared.state.lock().bytes.clone()
    }

    /// True when both handles refer to the same storage.
    pub fn same_buffer(&self, other: &CaptureBuffer) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl std::fmt::Debug for CaptureBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("CaptureBuffer")
            .field("capacity", &self.shared.capacity)
            .field("len", &state.bytes.len())
            .field("status", &state.status)
            .finish()
    }
}

fn capture_loop<R: Read>(shared: Arc<Shared>, mut source: R, on_data: OnData) {
    // Whatever ends the loop, the buffer must end up Complete and readers
    // must be woken.
    let guard_shared = Arc::clone(&shared);
    let guard_notify = Arc::clone(&on_data);
    let _complete = scopeguard::guard((), move |_| {
        let mut state = guard_shared.state.lock();
        if state.status != CaptureStatus::Complete {
            state.status = CaptureStatus::Complete;
            guard_shared.cond.notify_all();
            drop(state);
            guard_notify();
        }
    });

    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        // Only this thread grows `bytes`, so the room can't shrink under us.
        let room = shared.capacity - shared.state.lock().bytes.len();
        if room == 0 {
            tracing::debug!(capacity = shared.capacity, "capture buffer full");
            return;
        }
        let want = room.min(chunk.len());
        let result = source.read(&mut chunk[..want]);
        let newlines = match &result {
            Ok(n) => count_newlines(&chunk[..*n]),
            Err(_) => 0,
        };

        let mut state = shared.state.lock();
        while state.status == CaptureStatus::Paused {
            shared.cond.wait(&mut state);
        }
        match result {
            Ok(0) => {
                state.status = CaptureStatus::Complete;
                tracing::debug!(committed = state.bytes.len(), "capture reached EOF");
            }
            Ok(n) => {
                state.commit(&chunk[..n], newlines);
                if state.bytes.len() >= shared.capacity {
                    state.status = CaptureStatus::Complete;
                    tracing::debug!(capacity = shared.capacity, "capture buffer full");
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                tracing::warn!(error = %err, "capture source read failed");
                append_truncated(&mut state, shared.capacity, &failure_text("read error", &err));
                state.status = CaptureStatus::Complete;
            }
        }
        let done = state.status == CaptureStatus::Complete;
        shared.cond.notify_all();
        drop(state);

        on_data();
        if done {
            return;
        }
    }
}

fn failure_text(what: &str, err: &io::Error) -> String {
    format!("up: {what}: {err}")
}

fn append_truncated(state: &mut State, capacity: usize, text: &str) {
    let room = capacity.saturating_sub(state.bytes.len());
    let bytes = &text.as_bytes()[..text.len().min(room)];
    state.commit(bytes, count_newlines(bytes));
}
