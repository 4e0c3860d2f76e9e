use crate::mvi::Intent;

/// Scrolling requests for the output view.
///
/// Vertical intents carry the displayed buffer's record count so the
/// reducer can clamp without touching the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewIntent {
    ScrollBy { delta: isize, line_count: usize },
    ShiftLeft,
    ShiftRight,
    ResetX,
}

impl Intent for ViewIntent {}
