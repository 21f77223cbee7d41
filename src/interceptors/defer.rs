//! Hand matching commands back as unexecuted effects.

use crate::container::{
    dispatch_fn, DispatchError, DispatchFn, Interceptor, Outcome, StoreHandle,
};
use crate::core::{Action, Command, State};
use crate::effects::DeferredEffect;
use std::rc::Rc;

/// Returns [`Outcome::Deferred`] for actions matching a predicate instead of
/// committing them. See [`defer_when`].
pub struct DeferWhen<P> {
    name: String,
    predicate: Rc<dyn Fn(&Action<P>) -> bool>,
}

/// Defer actions for which `predicate` holds.
///
/// The returned effect forwards the action to the rest of the chain (the
/// interceptors registered after this one, then the commit step) each time
/// it is run. Running it zero times means the action never commits.
///
/// # Example
///
/// ```rust
/// use statecell::core::{Action, Command, Transition};
/// use statecell::interceptors::defer_when;
/// use statecell::StateContainer;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Counter {
///     count: i64,
/// }
///
/// let container = StateContainer::builder()
///     .initial(Counter { count: 0 })
///     .transition(Transition::new(|state: &Counter, action: &Action| match action.tag.as_str() {
///         "INC" => Counter { count: state.count + 1 },
///         _ => state.clone(),
///     }))
///     .interceptor(defer_when("defer-inc", |action: &Action| action.is("INC")))
///     .build()
///     .unwrap();
///
/// let pending = container
///     .dispatch(Command::action("INC"))
///     .unwrap()
///     .into_deferred()
///     .unwrap();
/// assert_eq!(container.get_state().count, 0);
///
/// pending.run().unwrap();
/// assert_eq!(container.get_state().count, 1);
/// ```
pub fn defer_when<P, F>(name: impl Into<String>, predicate: F) -> DeferWhen<P>
where
    F: Fn(&Action<P>) -> bool + 'static,
{
    DeferWhen {
        name: name.into(),
        predicate: Rc::new(predicate),
    }
}

impl<S: State, P: Clone + 'static> Interceptor<S, P> for DeferWhen<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn wrap(&self, store: StoreHandle<S, P>, next: DispatchFn<S, P>) -> DispatchFn<S, P> {
        let predicate = Rc::clone(&self.predicate);
        dispatch_fn(move |command: Command<S, P>| match command {
            Command::Action(action) if predicate(&action) => {
                tracing::debug!(tag = %action.tag, "deferring action");
                let next = Rc::clone(&next);
                let store = store.clone();
                Ok(Outcome::Deferred(DeferredEffect::from_fn(move || {
                    // Running from a transition or subscriber must not reach
                    // the inner interceptors.
                    if store.is_committing() {
                        tracing::debug!(tag = %action.tag, "rejecting re-entrant deferred dispatch");
                        return Err(DispatchError::ReentrantDispatch {
                            tag: action.tag.clone(),
                        });
                    }
                    next(Command::Action(action.clone()))
                })))
            }
            other => next(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::StateContainer;
    use crate::core::Transition;
    use crate::interceptors::from_fn;
    use std::cell::{Cell, RefCell};

    #[derive(Clone, PartialEq, Debug)]
    struct Counter {
        count: i64,
    }

    fn container() -> StateContainer<Counter> {
        StateContainer::builder()
            .initial(Counter { count: 0 })
            .transition(Transition::new(|state: &Counter, action: &Action| {
                match action.tag.as_str() {
                    "INC" => Counter {
                        count: state.count + 1,
                    },
                    _ => state.clone(),
                }
            }))
            .interceptor(defer_when("defer-inc", |action: &Action| action.is("INC")))
            .build()
            .unwrap()
    }

    #[test]
    fn matching_action_is_not_committed_until_run() {
        let container = container();
        let notified = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notified);
        container.subscribe(move || counter.set(counter.get() + 1));

        let outcome = container.dispatch(Command::action("INC")).unwrap();
        assert!(outcome.is_deferred());
        assert_eq!(container.get_state().count, 0);
        assert_eq!(notified.get(), 0);

        let pending = outcome.into_deferred().unwrap();
        let settled = pending.run().unwrap();
        assert_eq!(settled.state(), Some(&Counter { count: 1 }));
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn pending_dispatch_run_by_subscriber_skips_inner_interceptors() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let inner_log = Rc::clone(&log);
        let container = StateContainer::builder()
            .initial(Counter { count: 0 })
            .transition(Transition::new(|state: &Counter, action: &Action| {
                match action.tag.as_str() {
                    "INC" | "LATER" => Counter {
                        count: state.count + 1,
                    },
                    _ => state.clone(),
                }
            }))
            .interceptor(defer_when("defer-later", |action: &Action| action.is("LATER")))
            .interceptor(from_fn(
                "inner",
                move |_store: StoreHandle<Counter>, next: DispatchFn<Counter>| {
                    let log = Rc::clone(&inner_log);
                    dispatch_fn(move |command: Command<Counter>| {
                        log.borrow_mut().push(format!("inner:{}", command.tag()));
                        next(command)
                    })
                },
            ))
            .build()
            .unwrap();

        let pending = container
            .dispatch(Command::action("LATER"))
            .unwrap()
            .into_deferred()
            .unwrap();
        let nested = Rc::new(RefCell::new(None));
        let seen = Rc::clone(&nested);
        container.subscribe(move || {
            *seen.borrow_mut() = Some(pending.run());
        });

        container.dispatch(Command::action("INC")).unwrap();

        assert_eq!(*log.borrow(), vec!["inner:INC"]);
        assert!(matches!(
            nested.borrow_mut().take(),
            Some(Err(DispatchError::ReentrantDispatch { tag })) if tag == "LATER"
        ));
        assert_eq!(container.get_state().count, 1);
    }

    #[test]
    fn each_run_commits_again() {
        let container = container();
        let pending = container
            .dispatch(Command::action("INC"))
            .unwrap()
            .into_deferred()
            .unwrap();

        pending.run().unwrap();
        pending.run().unwrap();

        assert_eq!(container.get_state().count, 2);
    }

    #[test]
    fn memoized_pending_dispatch_commits_once() {
        let container = container();
        let pending = container
            .dispatch(Command::action("INC"))
            .unwrap()
            .into_deferred()
            .unwrap()
            .memoize_ok();

        pending.run().unwrap();
        pending.run().unwrap();

        assert_eq!(container.get_state().count, 1);
    }

    #[test]
    fn non_matching_action_passes_through() {
        let container = container();
        let outcome = container.dispatch(Command::action("NOOP")).unwrap();
        assert!(outcome.is_settled());
    }

    #[test]
    fn pending_dispatch_fails_after_container_drops() {
        let container = container();
        let pending = container
            .dispatch(Command::action("INC"))
            .unwrap()
            .into_deferred()
            .unwrap();
        drop(container);

        assert_eq!(
            pending.run().unwrap_err(),
            DispatchError::Detached {
                tag: "INC".to_string()
            }
        );
    }
}
