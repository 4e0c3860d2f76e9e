use crate::mvi::MviState;

/// Prompt drawn before the command text.
pub const PROMPT: &str = "| ";

/// Single-line command editor.
///
/// `cursor` indexes characters, not bytes, and is always `<= value.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorState {
    pub value: Vec<char>,
    pub cursor: usize,
    pub kill_space: Vec<char>,
}

impl MviState for EditorState {}

impl EditorState {
    /// Editor holding `text` with the cursor at `cursor`.
    pub fn with_text(text: &str, cursor: usize) -> Self {
        let value: Vec<char> = text.chars().collect();
        let cursor = cursor.min(value.len());
        Self {
            value,
            cursor,
            kill_space: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.value.iter().collect()
    }

    /// Screen column of the cursor, prompt included.
    pub fn cursor_column(&self) -> usize {
        PROMPT.chars().count() + self.cursor
    }
}
