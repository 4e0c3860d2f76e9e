use crate::mvi::MviState;

/// Columns moved by one horizontal scroll step.
pub const SHIFT_X: usize = 8;
/// Tab stops are every this many columns.
pub const TAB_WIDTH: usize = 8;

/// Scroll offsets of the output view: first visible record `y`, first
/// visible column `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub x: usize,
    pub y: usize,
}

impl MviState for ViewState {}
