use up::mvi::Reducer;
use up::ui::editor::{EditorIntent, EditorReducer, EditorState};

fn apply(state: EditorState, intents: &[EditorIntent]) -> EditorState {
    intents
        .iter()
        .fold(state, |state, &intent| EditorReducer::reduce(state, intent))
}

fn insert(text: &str, cursor: usize, chars: &[char]) -> String {
    let intents: Vec<_> = chars.iter().map(|&ch| EditorIntent::Insert(ch)).collect();
    apply(EditorState::with_text(text, cursor), &intents).text()
}

#[test]
fn insert_prepends_appends_and_inserts() {
    assert_eq!(insert("abc", 0, &['X']), "Xabc");
    assert_eq!(insert("abc", 0, &['☃']), "☃abc");
    assert_eq!(insert("abc", 1, &['X']), "aXbc");
    assert_eq!(insert("abc", 1, &['☃']), "a☃bc");
    assert_eq!(insert("abc", 3, &['X']), "abcX");
    assert_eq!(insert("abc", 3, &['☃']), "abc☃");
    assert_eq!(insert("abc", 1, &['X', 'Y']), "aXYbc");
}

#[test]
fn insert_advances_cursor() {
    let state = apply(EditorState::with_text("ab", 1), &[EditorIntent::Insert('☃')]);
    assert_eq!(state.cursor, 2);
    assert_eq!(state.cursor_column(), 4);
}

#[test]
fn backspace_and_delete() {
    let state = apply(EditorState::with_text("abc", 2), &[EditorIntent::Backspace]);
    assert_eq!(state.text(), "ac");
    assert_eq!(state.cursor, 1);

    let state = apply(EditorState::with_text("abc", 1), &[EditorIntent::Delete]);
    assert_eq!(state.text(), "ac");
    assert_eq!(state.cursor, 1);

    // Out of range edits are ignored.
    let state = apply(EditorState::with_text("abc", 0), &[EditorIntent::Backspace]);
    assert_eq!(state.text(), "abc");
    let state = apply(EditorState::with_text("abc", 3), &[EditorIntent::Delete]);
    assert_eq!(state.text(), "abc");
}

#[test]
fn cursor_movement_is_clamped() {
    let start = EditorState::with_text("ab", 0);
    let state = apply(start.clone(), &[EditorIntent::Left]);
    assert_eq!(state.cursor, 0);

    let state = apply(start.clone(), &[EditorIntent::End, EditorIntent::Right]);
    assert_eq!(state.cursor, 2);

    let state = apply(start, &[EditorIntent::Right, EditorIntent::Home]);
    assert_eq!(state.cursor, 0);
}

#[test]
fn kill_then_yank_restores_text() {
    let state = apply(EditorState::with_text("grep foo | wc", 8), &[EditorIntent::Kill]);
    assert_eq!(state.text(), "grep foo");
    assert_eq!(state.kill_space, " | wc".chars().collect::<Vec<_>>());

    let state = apply(state, &[EditorIntent::Home, EditorIntent::Yank]);
    assert_eq!(state.text(), " | wcgrep foo");
    assert_eq!(state.cursor, 5);

    // The kill space survives a yank.
    let state = apply(state, &[EditorIntent::End, EditorIntent::Yank]);
    assert_eq!(state.text(), " | wcgrep foo | wc");
}

#[test]
fn yank_with_empty_kill_space_is_noop() {
    let state = apply(EditorState::with_text("abc", 1), &[EditorIntent::Yank]);
    assert_eq!(state, EditorState::with_text("abc", 1));
}
