use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::editor::EditorIntent;

/// Output view movement requested by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    ShiftLeft,
    ShiftRight,
    ResetX,
}

/// Action to take after processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Key not bound to anything.
    None,
    Edit(EditorIntent),
    Scroll(ScrollAction),
    /// Enter: rerun the command line.
    Execute,
    /// Ctrl-S: freeze the captured input.
    PauseInput,
    /// Ctrl-Q: resume capturing and rerun.
    ResumeInput,
    /// Ctrl-C / Ctrl-D: quit without saving.
    Quit,
    /// Ctrl-X: save the command line as a script and quit.
    SaveAndQuit,
}

/// Map a key event to an action.
///
/// Editor bindings take precedence over view bindings, which take
/// precedence over global ones.
pub fn classify_key(key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }
    if let Some(intent) = editor_intent(key) {
        return InputAction::Edit(intent);
    }
    if let Some(scroll) = scroll_action(key) {
        return InputAction::Scroll(scroll);
    }

    match key.code {
        KeyCode::Enter if key.modifiers.is_empty() => InputAction::Execute,
        _ if is_ctrl_char(key, 's') => InputAction::PauseInput,
        _ if is_ctrl_char(key, 'q') => InputAction::ResumeInput,
        _ if is_ctrl_char(key, 'c') || is_ctrl_char(key, 'd') => InputAction::Quit,
        _ if is_ctrl_char(key, 'x') => InputAction::SaveAndQuit,
        _ => InputAction::None,
    }
}

fn editor_intent(key: KeyEvent) -> Option<EditorIntent> {
    let plain = key.modifiers.is_empty();
    let intent = match key.code {
        KeyCode::Char(ch) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            EditorIntent::Insert(ch)
        }
        KeyCode::Backspace => EditorIntent::Backspace,
        KeyCode::Delete => EditorIntent::Delete,
        KeyCode::Left if plain => EditorIntent::Left,
        KeyCode::Right if plain => EditorIntent::Right,
        _ if is_ctrl_char(key, 'b') => EditorIntent::Left,
        _ if is_ctrl_char(key, 'f') => EditorIntent::Right,
        _ if is_ctrl_char(key, 'a') => EditorIntent::Home,
        _ if is_ctrl_char(key, 'e') => EditorIntent::End,
        _ if is_ctrl_char(key, 'k') => EditorIntent::Kill,
        _ if is_ctrl_char(key, 'y') => EditorIntent::Yank,
        _ => return None,
    };
    Some(intent)
}

fn scroll_action(key: KeyEvent) -> Option<ScrollAction> {
    let shifted = key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Up if key.modifiers.is_empty() => ScrollAction::LineUp,
        KeyCode::Down if key.modifiers.is_empty() => ScrollAction::LineDown,
        KeyCode::PageUp if key.modifiers.is_empty() => ScrollAction::PageUp,
        KeyCode::PageDown if key.modifiers.is_empty() => ScrollAction::PageDown,
        KeyCode::Left if shifted => ScrollAction::ShiftLeft,
        KeyCode::Right if shifted => ScrollAction::ShiftRight,
        KeyCode::Home if shifted => ScrollAction::ResetX,
        _ => return None,
    };
    Some(action)
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
