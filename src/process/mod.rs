//! Child-process stages.
//!
//! A [`ProcessHandle`] runs one `<shell> -c <command>` invocation fed from a
//! capture buffer and captures its merged output into a fresh one.

mod cancel;
mod handle;
mod lifecycle;

pub use cancel::CancelToken;
pub use handle::ProcessHandle;
pub use lifecycle::{ProcessIntent, ProcessLifecycleReducer, ProcessState};
