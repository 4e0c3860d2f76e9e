//! Child-process lifecycle state machine.

use crate::mvi::{Intent, MviState, Reducer};

/// Lifecycle of one [`ProcessHandle`](super::ProcessHandle).
///
/// ```text
/// Starting ──Launched──→ Running ──Exited──→ Completed
///    │                      │
///    ├──LaunchFailed──→ Failed
///    └──────Cancelled───────┴──────────────→ Killed
/// ```
///
/// Completed, Failed and Killed are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessState {
    #[default]
    Starting,
    Running,
    /// Child exited on its own. `exit_code` is `None` when it died from a
    /// signal.
    Completed { exit_code: Option<i32> },
    Failed,
    Killed,
}

impl MviState for ProcessState {}

impl ProcessState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed { .. } | Self::Failed | Self::Killed
        )
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Events observed by a process handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessIntent {
    Launched,
    LaunchFailed,
    Exited { exit_code: Option<i32> },
    Cancelled,
}

impl Intent for ProcessIntent {}

pub struct ProcessLifecycleReducer;

impl Reducer for ProcessLifecycleReducer {
    type State = ProcessState;
    type Intent = ProcessIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        if state.is_terminal() {
            return state;
        }
        match (state, intent) {
            (ProcessState::Starting, ProcessIntent::Launched) => ProcessState::Running,
            (ProcessState::Starting, ProcessIntent::LaunchFailed) => ProcessState::Failed,
            (ProcessState::Running, ProcessIntent::Exited { exit_code }) => {
                ProcessState::Completed { exit_code }
            }
            (_, ProcessIntent::Cancelled) => ProcessState::Killed,
            (other, _) => other,
        }
    }
}
