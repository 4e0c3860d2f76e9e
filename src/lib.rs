//! Ultimate Plumber: interactive, live-previewing shell pipelines.
//!
//! Standard input is captured into a bounded buffer; the command line typed
//! by the user runs through the shell with that buffer as its input, and the
//! command's output is captured and displayed while it is produced.

pub mod args;
pub mod capture;
pub mod config;
pub mod error;
pub mod logging;
pub mod mvi;
pub mod pipeline;
pub mod process;
pub mod script;
pub mod shell;
pub mod ui;
