//! Values returned by a dispatch.

use super::error::DispatchError;
use crate::effects::DeferredEffect;
use std::fmt;
use std::rc::Rc;

/// A dispatch handed back unexecuted. Running it forwards the held command
/// to the rest of the chain and returns that result.
pub type PendingDispatch<S> = DeferredEffect<Result<Outcome<S>, DispatchError>>;

/// Result of a successful trip through the interceptor chain.
pub enum Outcome<S> {
    /// The transition function ran; holds the committed state.
    Settled(Rc<S>),

    /// An interceptor returned the command as an unexecuted effect.
    Deferred(PendingDispatch<S>),

    /// An interceptor short-circuited or handed the command to a procedure.
    Intercepted,
}

impl<S> Outcome<S> {
    pub fn state(&self) -> Option<&S> {
        match self {
            Self::Settled(state) => Some(state.as_ref()),
            _ => None,
        }
    }

    pub fn into_state(self) -> Option<Rc<S>> {
        match self {
            Self::Settled(state) => Some(state),
            _ => None,
        }
    }

    pub fn into_deferred(self) -> Option<PendingDispatch<S>> {
        match self {
            Self::Deferred(effect) => Some(effect),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    pub fn is_intercepted(&self) -> bool {
        matches!(self, Self::Intercepted)
    }
}

impl<S> Clone for Outcome<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Settled(state) => Self::Settled(Rc::clone(state)),
            Self::Deferred(effect) => Self::Deferred(effect.clone()),
            Self::Intercepted => Self::Intercepted,
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Outcome<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settled(state) => f.debug_tuple("Settled").field(state).finish(),
            Self::Deferred(effect) => f.debug_tuple("Deferred").field(effect).finish(),
            Self::Intercepted => f.write_str("Intercepted"),
        }
    }
}
