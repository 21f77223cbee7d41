//! Structured logging around every dispatch.

use crate::container::{dispatch_fn, DispatchFn, Interceptor, Outcome, StoreHandle};
use crate::core::{Command, State};
use std::fmt::Debug;

/// Logs each command with the state before and after it, through `tracing`.
///
/// Register it first so it sees the command before every other interceptor
/// and the settled result after all of them.
#[derive(Debug, Clone, Default)]
pub struct Logger;

/// Create the [`Logger`] interceptor.
pub fn logger() -> Logger {
    Logger
}

impl<S: State, P: Debug + 'static> Interceptor<S, P> for Logger {
    fn name(&self) -> &str {
        "logger"
    }

    fn wrap(&self, store: StoreHandle<S, P>, next: DispatchFn<S, P>) -> DispatchFn<S, P> {
        dispatch_fn(move |command: Command<S, P>| {
            let tag = command.tag().to_string();
            tracing::info!(
                tag = %tag,
                command = ?command,
                prev_state = ?store.get_state(),
                "dispatching"
            );

            let result = next(command);
            match &result {
                Ok(Outcome::Settled(state)) => {
                    tracing::info!(tag = %tag, next_state = ?state, "settled")
                }
                Ok(Outcome::Deferred(_)) => tracing::info!(tag = %tag, "deferred"),
                Ok(Outcome::Intercepted) => tracing::info!(tag = %tag, "intercepted"),
                Err(error) => tracing::warn!(tag = %tag, error = %error, "dispatch failed"),
            }
            result
        })
    }
}
