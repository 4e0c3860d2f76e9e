//! Fixed-capacity capture buffers.
//!
//! A [`CaptureBuffer`] is filled by exactly one background capture loop and
//! read from byte 0 by any number of independent [`CaptureReader`] cursors.
//!
//! ```text
//! source ──read──→ capture loop ──commit──→ [0, n) ──→ snapshot readers (UI)
//!                                                  └─→ blocking readers (child stdin)
//! ```

mod buffer;
mod reader;

pub use buffer::{CaptureBuffer, CaptureStatus, OnData, DEFAULT_CAPACITY};
pub use reader::{CaptureReader, ReadInterrupt, ReadMode};
