//! Model-View-Intent (MVI) state-machine primitives.
//!
//! Shared by every component that evolves a small piece of state in
//! response to discrete events: the child-process lifecycle, the command
//! line editor and the output view.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View / side effects
//!    ↑                                │
//!    └────────────────────────────────┘
//! ```
//!
//! - **State**: plain value, cloned to produce the next state
//! - **Intent**: user action or system event
//! - **Reducer**: pure function `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::MviState;

