use crate::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorIntent {
    Insert(char),
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character under the cursor.
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Cut from the cursor to the end of the line into the kill space.
    Kill,
    /// Insert the kill space at the cursor.
    Yank,
}

impl Intent for EditorIntent {}
