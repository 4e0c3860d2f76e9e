mod intent;
mod reducer;
mod state;
mod widget;

pub use intent::ViewIntent;
pub use reducer::ViewReducer;
pub use state::{ViewState, SHIFT_X, TAB_WIDTH};
pub use widget::{render_line, BufferBody};
