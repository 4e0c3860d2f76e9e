//! Reactive control loop tying command-line edits to process restarts.

mod controller;

pub use controller::{should_restart, ExecutionMode, PipelineController};
