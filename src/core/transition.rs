//! Transition functions: the only place state is computed.

use super::command::Action;
use super::state::State;
use std::rc::Rc;
use thiserror::Error;

/// Failure raised by a transition function.
///
/// The container reports it to the dispatch caller and leaves the previous
/// state in place.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct TransitionError {
    message: String,
}

impl TransitionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

type TransitionFn<S, P> = Rc<dyn Fn(&S, &Action<P>) -> Result<S, TransitionError>>;

/// Pure function computing the next state from the current one and an action.
///
/// A transition must be total: unrecognized tags return the state unchanged.
/// Cloning shares the underlying function.
///
/// # Example
///
/// ```rust
/// use statecell::core::{Action, Transition};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Counter {
///     count: i64,
/// }
///
/// let transition = Transition::new(|state: &Counter, action: &Action| match action.tag.as_str() {
///     "INC" => Counter { count: state.count + 1 },
///     _ => state.clone(),
/// });
///
/// let next = transition.apply(&Counter { count: 0 }, &Action::new("INC")).unwrap();
/// assert_eq!(next, Counter { count: 1 });
/// ```
pub struct Transition<S, P = serde_json::Value> {
    function: TransitionFn<S, P>,
}

impl<S: State, P: 'static> Transition<S, P> {
    /// Lift an infallible pure function.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&S, &Action<P>) -> S + 'static,
    {
        Transition {
            function: Rc::new(move |state: &S, action: &Action<P>| Ok(function(state, action))),
        }
    }

    /// Lift a pure function that may reject an action.
    pub fn fallible<F>(function: F) -> Self
    where
        F: Fn(&S, &Action<P>) -> Result<S, TransitionError> + 'static,
    {
        Transition {
            function: Rc::new(function),
        }
    }

    /// Compute the next state. Does not touch any container.
    pub fn apply(&self, state: &S, action: &Action<P>) -> Result<S, TransitionError> {
        (self.function)(state, action)
    }
}

impl<S, P> Clone for Transition<S, P> {
    fn clone(&self) -> Self {
        Self {
            function: Rc::clone(&self.function),
        }
    }
}
