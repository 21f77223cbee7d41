//! Procedure commands: executable intents that dispatch on their own schedule.

use crate::container::{dispatch_fn, DispatchFn, Interceptor, Outcome, StoreHandle};
use crate::core::{Command, State};

/// Runs [`Procedure`](crate::core::Procedure) commands instead of forwarding
/// them, and forwards everything else untouched.
///
/// The procedure runs synchronously, to completion, inside the current
/// dispatch. Whatever it dispatches (now, or later through a cloned handle)
/// enters the full chain as an independent dispatch. A procedure that never
/// dispatches leaves the state as it was.
#[derive(Debug, Clone, Default)]
pub struct Procedures;

/// Create the [`Procedures`] interceptor.
pub fn procedures() -> Procedures {
    Procedures
}

impl<S: State, P: 'static> Interceptor<S, P> for Procedures {
    fn name(&self) -> &str {
        "procedures"
    }

    fn wrap(&self, store: StoreHandle<S, P>, next: DispatchFn<S, P>) -> DispatchFn<S, P> {
        dispatch_fn(move |command: Command<S, P>| match command {
            Command::Procedure(procedure) => {
                tracing::debug!(tag = procedure.tag(), "running procedure");
                procedure.invoke(&store);
                Ok(Outcome::Intercepted)
            }
            action => next(action),
        })
    }
}
