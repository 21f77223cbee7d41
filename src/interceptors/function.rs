//! Closure-backed interceptors.

use crate::container::{DispatchFn, Interceptor, StoreHandle};
use std::marker::PhantomData;

/// Interceptor built from a named closure. See [`from_fn`].
pub struct FnInterceptor<S, P, F> {
    name: String,
    wrap: F,
    _phantom: PhantomData<fn() -> (S, P)>,
}

/// Create an interceptor from a closure of shape `(store, next) -> link`.
///
/// # Example
///
/// ```rust
/// use statecell::container::{dispatch_fn, DispatchFn, StoreHandle};
/// use statecell::core::Command;
/// use statecell::interceptors::from_fn;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Counter {
///     count: i64,
/// }
///
/// let uppercase = from_fn(
///     "uppercase",
///     |_store: StoreHandle<Counter>, next: DispatchFn<Counter>| {
///         dispatch_fn(move |command: Command<Counter>| match command {
///             Command::Action(mut action) => {
///                 action.tag = action.tag.to_uppercase();
///                 next(Command::Action(action))
///             }
///             other => next(other),
///         })
///     },
/// );
/// # let _ = uppercase;
/// ```
pub fn from_fn<S, P, F>(name: impl Into<String>, wrap: F) -> FnInterceptor<S, P, F>
where
    F: Fn(StoreHandle<S, P>, DispatchFn<S, P>) -> DispatchFn<S, P>,
{
    FnInterceptor {
        name: name.into(),
        wrap,
        _phantom: PhantomData,
    }
}

impl<S, P, F> Interceptor<S, P> for FnInterceptor<S, P, F>
where
    F: Fn(StoreHandle<S, P>, DispatchFn<S, P>) -> DispatchFn<S, P>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn wrap(&self, store: StoreHandle<S, P>, next: DispatchFn<S, P>) -> DispatchFn<S, P> {
        (self.wrap)(store, next)
    }
}
