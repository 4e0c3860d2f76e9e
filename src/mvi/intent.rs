//! Base trait for intents (user/system actions).

/// Marker trait for intent objects.
///
/// Intents represent key presses, process events and other discrete
/// happenings. They are consumed by reducers to produce new states.
pub trait Intent: Send + 'static {}
