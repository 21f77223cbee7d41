//! Dispatch errors.

use crate::core::TransitionError;
use thiserror::Error;

/// Errors that can occur while dispatching a command.
///
/// None of these are retried by the container. When dispatch fails the
/// state is exactly what it was before the call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("Dispatch of '{tag}' rejected: a dispatch is already committing on this container")]
    ReentrantDispatch { tag: String },

    #[error("Transition for '{tag}' failed: {source}")]
    Transition {
        tag: String,
        #[source]
        source: TransitionError,
    },

    #[error("Procedure '{tag}' reached the transition step; no interceptor handled it")]
    UnhandledProcedure { tag: String },

    #[error("Container dropped before '{tag}' could be dispatched")]
    Detached { tag: String },
}

impl DispatchError {
    /// Tag of the command that failed.
    pub fn tag(&self) -> &str {
        match self {
            Self::ReentrantDispatch { tag }
            | Self::Transition { tag, .. }
            | Self::UnhandledProcedure { tag }
            | Self::Detached { tag } => tag,
        }
    }
}
