//! Interceptors and chain compilation.
//!
//! An interceptor wraps the dispatch function of its successor. Given
//! interceptors `[i1, i2, ..., iN]` and the terminal commit step `T`, the
//! compiled chain is `i1(i2(...iN(T)...))`: the first registered
//! interceptor sees a command first on the way in and its result last on
//! the way out.

use super::error::DispatchError;
use super::outcome::Outcome;
use super::store::StoreHandle;
use crate::core::Command;
use std::rc::Rc;

/// One link of the compiled chain.
pub type DispatchFn<S, P = serde_json::Value> =
    Rc<dyn Fn(Command<S, P>) -> Result<Outcome<S>, DispatchError>>;

/// Build a [`DispatchFn`] from a closure.
pub fn dispatch_fn<S, P, F>(link: F) -> DispatchFn<S, P>
where
    F: Fn(Command<S, P>) -> Result<Outcome<S>, DispatchError> + 'static,
{
    Rc::new(link)
}

/// A composable wrapper around the dispatch pipeline.
///
/// `wrap` runs once, when the container is built. The returned link decides
/// per command whether to forward it to `next` (unchanged or transformed),
/// short-circuit with its own [`Outcome`], or hand it off elsewhere.
///
/// The `store` handle is only usable from inside the returned link; during
/// `wrap` itself the container is still being assembled.
pub trait Interceptor<S, P = serde_json::Value> {
    /// Name used in diagnostics. Must be non-empty and unique per container.
    fn name(&self) -> &str;

    fn wrap(&self, store: StoreHandle<S, P>, next: DispatchFn<S, P>) -> DispatchFn<S, P>;
}

impl<S, P> Interceptor<S, P> for Box<dyn Interceptor<S, P>> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn wrap(&self, store: StoreHandle<S, P>, next: DispatchFn<S, P>) -> DispatchFn<S, P> {
        (**self).wrap(store, next)
    }
}

/// Fold interceptors around the terminal link, last registered innermost.
pub(crate) fn compile<S, P>(
    interceptors: &[Box<dyn Interceptor<S, P>>],
    store: &StoreHandle<S, P>,
    terminal: DispatchFn<S, P>,
) -> DispatchFn<S, P> {
    interceptors.iter().rev().fold(terminal, |next, interceptor| {
        tracing::trace!(interceptor = interceptor.name(), "wrapping dispatch link");
        interceptor.wrap(store.clone(), next)
    })
}
