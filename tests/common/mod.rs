//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::io::{self, PipeReader, PipeWriter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use up::capture::{CaptureBuffer, CaptureStatus, OnData};

pub const TIMEOUT: Duration = Duration::from_secs(10);

/// Poll `cond` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    cond()
}

pub fn wait_complete(buffer: &CaptureBuffer) -> bool {
    wait_until(TIMEOUT, || buffer.status() == CaptureStatus::Complete)
}

pub fn text(buffer: &CaptureBuffer) -> String {
    String::from_utf8_lossy(&buffer.contents()).into_owned()
}

pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("Failed to build runtime")
}

/// Anonymous pipe: the test writes, a capture buffer reads.
pub fn pipe_source() -> (PipeReader, PipeWriter) {
    io::pipe().expect("Failed to create pipe")
}

pub fn noop() -> OnData {
    Arc::new(|| {})
}

/// Callback counting its invocations.
pub fn counter() -> (OnData, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&count);
    let on_data: OnData = Arc::new(move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    (on_data, count)
}

/// Root buffer already holding `data` and complete.
pub fn complete_root(data: &str, capacity: usize) -> CaptureBuffer {
    let buffer = CaptureBuffer::new(capacity)
        .start_capturing(io::Cursor::new(data.as_bytes().to_vec()), noop());
    assert!(wait_complete(&buffer));
    buffer
}

pub fn sh() -> std::path::PathBuf {
    std::path::PathBuf::from("/bin/sh")
}
