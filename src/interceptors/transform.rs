//! Interceptors that short-circuit or rewrite actions.

use crate::container::{dispatch_fn, DispatchFn, Interceptor, Outcome, StoreHandle};
use crate::core::{Action, Command, State};
use std::rc::Rc;

type Predicate<S, P> = Rc<dyn Fn(&Action<P>, &S) -> bool>;

/// Drops actions rejected by a predicate. See [`filter`].
pub struct Filter<S, P> {
    name: String,
    allow: Predicate<S, P>,
}

/// Forward only actions for which `allow(action, current_state)` holds.
///
/// Rejected actions short-circuit with [`Outcome::Intercepted`]: the
/// transition function never sees them and subscribers are not notified.
/// Procedures pass through untouched.
pub fn filter<S, P, F>(name: impl Into<String>, allow: F) -> Filter<S, P>
where
    F: Fn(&Action<P>, &S) -> bool + 'static,
{
    Filter {
        name: name.into(),
        allow: Rc::new(allow),
    }
}

impl<S: State, P: 'static> Interceptor<S, P> for Filter<S, P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn wrap(&self, store: StoreHandle<S, P>, next: DispatchFn<S, P>) -> DispatchFn<S, P> {
        let allow = Rc::clone(&self.allow);
        dispatch_fn(move |command: Command<S, P>| {
            if let (Command::Action(action), Some(state)) = (&command, store.get_state()) {
                if !allow(action, state.as_ref()) {
                    tracing::debug!(tag = %action.tag, "action filtered out");
                    return Ok(Outcome::Intercepted);
                }
            }
            next(command)
        })
    }
}

/// Rewrites actions before forwarding them. See [`map_command`].
pub struct MapCommand<P> {
    name: String,
    rewrite: Rc<dyn Fn(Action<P>) -> Action<P>>,
}

/// Forward every action through `rewrite` first. Procedures pass through.
pub fn map_command<P, F>(name: impl Into<String>, rewrite: F) -> MapCommand<P>
where
    F: Fn(Action<P>) -> Action<P> + 'static,
{
    MapCommand {
        name: name.into(),
        rewrite: Rc::new(rewrite),
    }
}

impl<S: State, P: 'static> Interceptor<S, P> for MapCommand<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn wrap(&self, _store: StoreHandle<S, P>, next: DispatchFn<S, P>) -> DispatchFn<S, P> {
        let rewrite = Rc::clone(&self.rewrite);
        dispatch_fn(move |command: Command<S, P>| match command {
            Command::Action(action) => next(Command::Action(rewrite(action))),
            procedure => next(procedure),
        })
    }
}
