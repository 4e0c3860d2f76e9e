use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::buffer::{CaptureStatus, Shared};

/// How a [`CaptureReader`] behaves once it has caught up with the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Report end-of-stream as soon as every committed byte was returned.
    /// Never blocks; used for rendering.
    Snapshot,
    /// Wait for more bytes until the buffer completes or is paused.
    /// Used to feed a child process.
    Blocking,
}

/// Independent sequential cursor over a capture buffer.
///
/// End-of-stream is not sticky: reading again after `Ok(0)` returns any
/// bytes committed in the meantime. A blocking reader that has caught up
/// reports end-of-stream once for every pause it has not yet observed, even
/// when the buffer was resumed before it woke.
pub struct CaptureReader {
    shared: Arc<Shared>,
    pos: usize,
    mode: ReadMode,
    /// Last pause epoch this reader reported end-of-stream for.
    epoch: u64,
    interrupted: Arc<AtomicBool>,
}

/// Ends a [`CaptureReader`] from another thread.
///
/// Once fired, every read (including one blocked waiting for data) returns
/// `Ok(0)`.
#[derive(Clone)]
pub struct ReadInterrupt {
    shared: Arc<Shared>,
    interrupted: Arc<AtomicBool>,
}

impl ReadInterrupt {
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
        // Taking the lock orders the store before a waiter's predicate check.
        let _state = self.shared.state.lock();
        self.shared.cond.notify_all();
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }
}

impl CaptureReader {
    pub(super) fn new(shared: Arc<Shared>, mode: ReadMode) -> Self {
        let epoch = shared.state.lock().pause_epoch;
        Self {
            shared,
            pos: 0,
            mode,
            epoch,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle that ends this reader's current and future reads.
    pub fn interrupter(&self) -> ReadInterrupt {
        ReadInterrupt {
            shared: Arc::clone(&self.shared),
            interrupted: Arc::clone(&self.interrupted),
        }
    }

    /// Offset of the next byte this reader will return.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn mode(&self) -> ReadMode {
        self.mode
    }
}

impl Read for CaptureReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut state = self.shared.state.lock();
        if self.mode == ReadMode::Blocking {
            while self.pos == state.bytes.len()
                && state.status == CaptureStatus::Capturing
                && state.pause_epoch == self.epoch
                && state.bytes.len() < self.shared.capacity
                && !self.interrupted.load(Ordering::SeqCst)
            {
                self.shared.cond.wait(&mut state);
            }
        }
        if self.interrupted.load(Ordering::SeqCst) {
            return Ok(0);
        }

        let available = &state.bytes[self.pos..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;

        if n == 0 && self.mode == ReadMode::Blocking {
            self.epoch = state.pause_epoch;
            tracing::trace!(
                offset = self.pos,
                status = ?state.status,
                "blocking reader emitting EOF"
            );
        }
        Ok(n)
    }
}

impl std::fmt::Debug for CaptureReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureReader")
            .field("pos", &self.pos)
            .field("mode", &self.mode)
            .finish()
    }
}
