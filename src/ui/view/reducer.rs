use crate::mvi::Reducer;

use super::intent::ViewIntent;
use super::state::{ViewState, SHIFT_X};

pub struct ViewReducer;

impl Reducer for ViewReducer {
    type State = ViewState;
    type Intent = ViewIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ViewIntent::ScrollBy { delta, line_count } => {
                let max_y = line_count.saturating_sub(1);
                let y = state.y.saturating_add_signed(delta).min(max_y);
                ViewState { y, ..state }
            }
            ViewIntent::ShiftLeft => ViewState {
                x: state.x.saturating_sub(SHIFT_X),
                ..state
            },
            ViewIntent::ShiftRight => ViewState {
                x: state.x + SHIFT_X,
                ..state
            },
            ViewIntent::ResetX => ViewState { x: 0, ..state },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll(y: usize, delta: isize, line_count: usize) -> usize {
        ViewReducer::reduce(ViewState { x: 0, y }, ViewIntent::ScrollBy { delta, line_count }).y
    }

    #[test]
    fn scrolling_clamps_to_last_record() {
        assert_eq!(scroll(0, 1, 3), 1);
        assert_eq!(scroll(2, 1, 3), 2);
        assert_eq!(scroll(0, 50, 3), 2);
    }

    #[test]
    fn scrolling_up_stops_at_zero() {
        assert_eq!(scroll(1, -1, 3), 0);
        assert_eq!(scroll(0, -1, 3), 0);
        assert_eq!(scroll(5, -20, 10), 0);
    }

    #[test]
    fn empty_buffer_pins_y_to_zero() {
        assert_eq!(scroll(4, 1, 0), 0);
    }

    #[test]
    fn horizontal_shifts_move_by_eight() {
        let state = ViewReducer::reduce(ViewState::default(), ViewIntent::ShiftRight);
        assert_eq!(state.x, 8);
        let state = ViewReducer::reduce(state, ViewIntent::ShiftRight);
        assert_eq!(state.x, 16);
        let state = ViewReducer::reduce(state, ViewIntent::ShiftLeft);
        assert_eq!(state.x, 8);
        let state = ViewReducer::reduce(ViewState { x: 3, y: 7 }, ViewIntent::ShiftLeft);
        assert_eq!(state, ViewState { x: 0, y: 7 });
    }

    #[test]
    fn reset_x_keeps_y() {
        let state = ViewReducer::reduce(ViewState { x: 24, y: 5 }, ViewIntent::ResetX);
        assert_eq!(state, ViewState { x: 0, y: 5 });
    }
}
