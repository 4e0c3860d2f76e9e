//! Base trait for reducer-managed state.

/// Marker trait for state objects.
///
/// States should be cheap to clone, self-contained and comparable so that
/// callers can detect changes.
pub trait MviState: Clone + PartialEq + Default + Send + 'static {}
