//! Core State trait for container state snapshots.
//!
//! A container owns exactly one value implementing this trait. The value is
//! never mutated in place: each committed transition replaces it wholesale.

use std::fmt::Debug;

/// Marker trait for state held by a [`StateContainer`](crate::StateContainer).
///
/// Snapshots are immutable values. The container hands them out behind an
/// `Rc`, so reading state never copies it.
///
/// # Required Traits
///
/// - `Clone`: transition functions build the next snapshot from the current one
/// - `PartialEq`: needed by [`NotifyPolicy::OnChange`](crate::NotifyPolicy::OnChange)
/// - `Debug`: snapshots show up in tracing output
///
/// The trait is implemented for every type meeting these bounds.
///
/// # Example
///
/// ```rust
/// use statecell::core::State;
///
/// #[derive(Clone, PartialEq, Debug, Default)]
/// struct Counter {
///     count: i64,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
/// assert_state(&Counter::default());
/// ```
pub trait State: Clone + PartialEq + Debug + 'static {}

impl<T> State for T where T: Clone + PartialEq + Debug + 'static {}
