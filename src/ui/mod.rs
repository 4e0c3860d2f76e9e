//! Interactive front end: command line editor over a live output view.

pub mod app;
pub mod editor;
pub mod events;
pub mod input;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod view;
