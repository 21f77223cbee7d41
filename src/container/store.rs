//! The state container: one state cell, one transition function, one chain.

use super::error::DispatchError;
use super::interceptor::{compile, dispatch_fn, DispatchFn, Interceptor};
use super::outcome::Outcome;
use super::subscribers::{SubscriberSet, Subscription};
use crate::builder::{ConfigurationError, ContainerBuilder};
use crate::core::{Action, Command, State, Transition};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Whether a commit that leaves state unchanged notifies subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyPolicy {
    /// Notify after every commit, including identity transitions.
    #[default]
    Always,

    /// Skip notification when the new state equals the old one. The old
    /// snapshot is kept, so `Rc::ptr_eq` holds across the dispatch.
    OnChange,
}

pub(crate) struct Inner<S, P> {
    state: RefCell<Rc<S>>,
    transition: Transition<S, P>,
    subscribers: Rc<SubscriberSet>,
    committing: Cell<bool>,
    notify: NotifyPolicy,
    chain: DispatchFn<S, P>,
}

/// Holds the commit flag for the duration of a commit, clearing it on drop
/// so a panicking transition or subscriber does not wedge the container.
struct CommitGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> CommitGuard<'a> {
    fn enter(flag: &'a Cell<bool>, tag: &str) -> Result<Self, DispatchError> {
        if flag.replace(true) {
            return Err(DispatchError::ReentrantDispatch {
                tag: tag.to_string(),
            });
        }
        Ok(Self { flag })
    }
}

impl Drop for CommitGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl<S: State, P: 'static> Inner<S, P> {
    fn current(&self) -> Rc<S> {
        Rc::clone(&self.state.borrow())
    }

    fn dispatch(&self, command: Command<S, P>) -> Result<Outcome<S>, DispatchError> {
        if self.committing.get() {
            tracing::debug!(tag = command.tag(), "rejecting re-entrant dispatch");
            return Err(DispatchError::ReentrantDispatch {
                tag: command.tag().to_string(),
            });
        }

        let span = tracing::debug_span!("dispatch", tag = command.tag());
        let _entered = span.enter();
        (self.chain)(command)
    }

    /// Terminal link: apply the transition, replace state, notify.
    fn commit(&self, command: Command<S, P>) -> Result<Outcome<S>, DispatchError> {
        let action = match command {
            Command::Action(action) => action,
            Command::Procedure(procedure) => {
                return Err(DispatchError::UnhandledProcedure {
                    tag: procedure.tag().to_string(),
                })
            }
        };

        let _guard = CommitGuard::enter(&self.committing, &action.tag)?;
        let current = self.current();
        let next = self.apply(&current, &action)?;

        if self.notify == NotifyPolicy::OnChange && next == *current {
            tracing::trace!(tag = %action.tag, "state unchanged, skipping notification");
            return Ok(Outcome::Settled(current));
        }

        let next = Rc::new(next);
        *self.state.borrow_mut() = Rc::clone(&next);
        tracing::trace!(tag = %action.tag, "state committed");

        self.subscribers.notify();
        Ok(Outcome::Settled(next))
    }

    fn apply(&self, current: &S, action: &Action<P>) -> Result<S, DispatchError> {
        self.transition
            .apply(current, action)
            .map_err(|source| DispatchError::Transition {
                tag: action.tag.clone(),
                source,
            })
    }
}

/// A synchronous reactive state container.
///
/// State changes only through the transition function, reached through the
/// interceptor chain by [`dispatch`](Self::dispatch). Each commit replaces
/// the state and notifies subscribers, in registration order, before
/// `dispatch` returns.
///
/// The container is single-threaded. Interceptors, procedures and
/// subscribers reach it through a [`StoreHandle`], which does not keep it
/// alive.
///
/// # Example
///
/// ```rust
/// use statecell::core::{Action, Command, Transition};
/// use statecell::StateContainer;
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
/// let container = StateContainer::new(Counter { count: 0 }, transition, Vec::new()).unwrap();
/// container.dispatch(Command::action("INC")).unwrap();
/// container.dispatch(Command::action("INC")).unwrap();
///
/// assert_eq!(container.get_state().count, 2);
/// ```
pub struct StateContainer<S, P = serde_json::Value> {
    inner: Rc<Inner<S, P>>,
}

impl<S: State, P: 'static> StateContainer<S, P> {
    /// Build a container from its three inputs.
    ///
    /// Fails with [`ConfigurationError`] if an interceptor is malformed.
    pub fn new(
        initial: S,
        transition: Transition<S, P>,
        interceptors: Vec<Box<dyn Interceptor<S, P>>>,
    ) -> Result<Self, ConfigurationError> {
        ContainerBuilder::new()
            .initial(initial)
            .transition(transition)
            .interceptors(interceptors)
            .build()
    }

    /// Start a [`ContainerBuilder`] for this state type.
    pub fn builder() -> ContainerBuilder<S, P> {
        ContainerBuilder::new()
    }

    /// Assemble the container. Callers validate the configuration first.
    pub(crate) fn assemble(
        initial: S,
        transition: Transition<S, P>,
        interceptors: &[Box<dyn Interceptor<S, P>>],
        notify: NotifyPolicy,
    ) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<Inner<S, P>>| {
            let terminal = {
                let weak = weak.clone();
                dispatch_fn(move |command: Command<S, P>| match weak.upgrade() {
                    Some(inner) => inner.commit(command),
                    None => Err(DispatchError::Detached {
                        tag: command.tag().to_string(),
                    }),
                })
            };
            let handle = StoreHandle { inner: weak.clone() };

            Inner {
                state: RefCell::new(Rc::new(initial)),
                transition,
                subscribers: Rc::new(SubscriberSet::default()),
                committing: Cell::new(false),
                notify,
                chain: compile(interceptors, &handle, terminal),
            }
        });

        tracing::debug!(
            interceptors = interceptors.len(),
            notify = ?notify,
            "state container assembled"
        );
        Self { inner }
    }

    /// Current state snapshot. O(1); the snapshot is shared, never copied.
    pub fn get_state(&self) -> Rc<S> {
        self.inner.current()
    }

    /// Send a command through the interceptor chain.
    ///
    /// Returns whatever the chain returns: normally
    /// [`Outcome::Settled`] with the committed state. Fails with
    /// [`DispatchError::ReentrantDispatch`] when called from a transition
    /// function or subscriber of this container.
    pub fn dispatch(&self, command: Command<S, P>) -> Result<Outcome<S>, DispatchError> {
        self.inner.dispatch(command)
    }

    /// Register a callback run after every notifying commit.
    ///
    /// A panicking callback aborts the rest of that notification pass and
    /// unwinds out of `dispatch`; the committed state stays in place.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let id = self.inner.subscribers.insert(Rc::new(callback));
        Subscription::new(id, &self.inner.subscribers)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    /// The policy chosen at build time.
    pub fn notify_policy(&self) -> NotifyPolicy {
        self.inner.notify
    }

    /// Weak handle for interceptors, procedures and subscribers.
    pub fn handle(&self) -> StoreHandle<S, P> {
        StoreHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<S: fmt::Debug, P> fmt::Debug for StateContainer<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateContainer")
            .field("state", &self.inner.state.borrow())
            .field("subscribers", &self.inner.subscribers)
            .field("notify", &self.inner.notify)
            .finish_non_exhaustive()
    }
}

/// Non-owning reference to a container.
///
/// Gives access to `get_state` and `dispatch` without keeping the container
/// alive. Once the container is dropped, `get_state` returns `None` and
/// `dispatch` fails with [`DispatchError::Detached`].
pub struct StoreHandle<S, P = serde_json::Value> {
    inner: Weak<Inner<S, P>>,
}

impl<S: State, P: 'static> StoreHandle<S, P> {
    /// Current state, or `None` once the container is gone.
    pub fn get_state(&self) -> Option<Rc<S>> {
        self.inner.upgrade().map(|inner| inner.current())
    }

    /// Same as [`StateContainer::dispatch`]; fails with
    /// [`DispatchError::Detached`] once the container is gone.
    pub fn dispatch(&self, command: Command<S, P>) -> Result<Outcome<S>, DispatchError> {
        match self.inner.upgrade() {
            Some(inner) => inner.dispatch(command),
            None => Err(DispatchError::Detached {
                tag: command.tag().to_string(),
            }),
        }
    }

    /// Whether the container is still alive.
    pub fn is_attached(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Whether the container is inside a commit (transition or notification).
    pub(crate) fn is_committing(&self) -> bool {
        self.inner
            .upgrade()
            .map_or(false, |inner| inner.committing.get())
    }
}

impl<S, P> Clone for StoreHandle<S, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S, P> fmt::Debug for StoreHandle<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreHandle")
            .field("attached", &(self.inner.strong_count() > 0))
            .finish()
    }
}
