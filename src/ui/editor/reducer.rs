use crate::mvi::Reducer;

use super::intent::EditorIntent;
use super::state::EditorState;

pub struct EditorReducer;

impl Reducer for EditorReducer {
    type State = EditorState;
    type Intent = EditorIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            EditorIntent::Insert(ch) => insert(&mut state, ch),
            EditorIntent::Backspace => {
                if state.cursor > 0 {
                    state.cursor -= 1;
                    state.value.remove(state.cursor);
                }
            }
            EditorIntent::Delete => {
                if state.cursor < state.value.len() {
                    state.value.remove(state.cursor);
                }
            }
            EditorIntent::Left => state.cursor = state.cursor.saturating_sub(1),
            EditorIntent::Right => state.cursor = (state.cursor + 1).min(state.value.len()),
            EditorIntent::Home => state.cursor = 0,
            EditorIntent::End => state.cursor = state.value.len(),
            EditorIntent::Kill => {
                state.kill_space = state.value.split_off(state.cursor);
            }
            EditorIntent::Yank => {
                let yanked = state.kill_space.clone();
                for ch in yanked {
                    insert(&mut state, ch);
                }
            }
        }
        state
    }
}

fn insert(state: &mut EditorState, ch: char) {
    state.value.insert(state.cursor, ch);
    state.cursor += 1;
}
