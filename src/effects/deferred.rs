//! Deferred effects: impure operations described as values.

use super::error::EffectExecutionError;
use std::cell::OnceCell;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

/// A lazily evaluated, composable description of an effectful operation.
///
/// Building, mapping or chaining an effect never runs anything. Only
/// [`run`](Self::run) executes the operation, in the calling context, and it
/// does so on every call unless the effect was wrapped with
/// [`memoize`](Self::memoize) or [`memoize_ok`](Self::memoize_ok).
///
/// Effects are immutable. Combinators return a new effect closing over the
/// previous one, so cloning is a reference-count bump.
///
/// # Example
///
/// ```rust
/// use statecell::effects::DeferredEffect;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let calls = Rc::new(Cell::new(0));
/// let counted = Rc::clone(&calls);
///
/// let effect = DeferredEffect::from_fn(move || {
///     counted.set(counted.get() + 1);
///     20
/// })
/// .map(|n| n + 1)
/// .chain(|n| DeferredEffect::of(n * 2));
///
/// assert_eq!(calls.get(), 0);
/// assert_eq!(effect.run(), 42);
/// assert_eq!(effect.run(), 42);
/// assert_eq!(calls.get(), 2);
/// ```
pub struct DeferredEffect<T> {
    operation: Rc<dyn Fn() -> T>,
}

impl<T: 'static> DeferredEffect<T> {
    /// Wrap a zero-argument operation without executing it.
    pub fn from_fn<F>(operation: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Self {
            operation: Rc::new(operation),
        }
    }

    /// An effect that yields `value` and does nothing else.
    pub fn of(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(move || value.clone())
    }

    /// Transform the result once the effect runs.
    pub fn map<U, F>(self, f: F) -> DeferredEffect<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let operation = self.operation;
        DeferredEffect::from_fn(move || f(operation()))
    }

    /// Sequence a dependent effect.
    ///
    /// Associative: `e.chain(f).chain(g)` runs the same operations, the same
    /// number of times, as `e.chain(|x| f(x).chain(g))`.
    pub fn chain<U, F>(self, f: F) -> DeferredEffect<U>
    where
        U: 'static,
        F: Fn(T) -> DeferredEffect<U> + 'static,
    {
        let operation = self.operation;
        DeferredEffect::from_fn(move || f(operation()).run())
    }

    /// Execute the operation now.
    ///
    /// A panic raised by the operation unwinds through this call; nothing
    /// is caught.
    pub fn run(&self) -> T {
        (self.operation)()
    }

    /// Run the operation at most once and replay its outcome afterwards.
    ///
    /// Clones of the returned effect share the cache. For effects yielding
    /// `Result`, errors are cached too; use [`memoize_ok`](Self::memoize_ok)
    /// to retry after failures.
    ///
    /// # Panics
    ///
    /// If the operation runs this effect (or a clone of it) before finishing,
    /// the nested run fills the cache first and the outer run then panics
    /// instead of overwriting it.
    pub fn memoize(self) -> Self
    where
        T: Clone,
    {
        let operation = self.operation;
        let cache: Rc<OnceCell<T>> = Rc::new(OnceCell::new());
        Self::from_fn(move || cache.get_or_init(|| operation()).clone())
    }
}

impl<T: 'static, E: 'static> DeferredEffect<Result<T, E>> {
    /// Wrap an operation reporting failure through `Result`.
    ///
    /// The error surfaces as [`EffectExecutionError`] when the effect runs.
    pub fn fallible<F>(operation: F) -> DeferredEffect<Result<T, EffectExecutionError>>
    where
        F: Fn() -> Result<T, E> + 'static,
        E: Error,
    {
        DeferredEffect::from_fn(move || operation().map_err(EffectExecutionError::new))
    }

    /// Transform a successful result, passing errors through.
    pub fn map_ok<U, F>(self, f: F) -> DeferredEffect<Result<U, E>>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map(move |result| result.map(&f))
    }

    /// Sequence a dependent fallible effect; an `Err` skips `f` entirely.
    pub fn and_then<U, F>(self, f: F) -> DeferredEffect<Result<U, E>>
    where
        U: 'static,
        F: Fn(T) -> DeferredEffect<Result<U, E>> + 'static,
    {
        let operation = self.operation;
        DeferredEffect::from_fn(move || match operation() {
            Ok(value) => f(value).run(),
            Err(err) => Err(err),
        })
    }

    /// Cache the first successful outcome. Failed runs are not cached, so
    /// the next `run` retries the operation.
    pub fn memoize_ok(self) -> Self
    where
        T: Clone,
    {
        let operation = self.operation;
        let cache: Rc<OnceCell<T>> = Rc::new(OnceCell::new());
        Self::from_fn(move || {
            if let Some(value) = cache.get() {
                return Ok(value.clone());
            }
            let value = operation()?;
            Ok(cache.get_or_init(|| value).clone())
        })
    }
}

impl<T> Clone for DeferredEffect<T> {
    fn clone(&self) -> Self {
        Self {
            operation: Rc::clone(&self.operation),
        }
    }
}

impl<T> fmt::Debug for DeferredEffect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredEffect").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::fmt;

    #[derive(Debug)]
    struct Flaky;

    impl fmt::Display for Flaky {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "flaky operation failed")
        }
    }

    impl std::error::Error for Flaky {}

    fn counting(calls: &Rc<Cell<usize>>, value: i32) -> DeferredEffect<i32> {
        let calls = Rc::clone(calls);
        DeferredEffect::from_fn(move || {
            calls.set(calls.get() + 1);
            value
        })
    }

    #[test]
    fn of_returns_value() {
        assert_eq!(DeferredEffect::of("ready").run(), "ready");
    }

    #[test]
    fn construction_and_composition_are_lazy() {
        let calls = Rc::new(Cell::new(0));
        let mapped_calls = Rc::clone(&calls);
        let chained_calls = Rc::clone(&calls);

        let effect = counting(&calls, 1)
            .map(move |n| {
                mapped_calls.set(mapped_calls.get() + 1);
                n + 1
            })
            .chain(move |n| {
                chained_calls.set(chained_calls.get() + 1);
                DeferredEffect::of(n * 10)
            });

        assert_eq!(calls.get(), 0);
        assert_eq!(effect.run(), 20);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn every_run_re_executes() {
        let calls = Rc::new(Cell::new(0));
        let effect = counting(&calls, 5);

        effect.run();
        effect.run();
        effect.clone().run();

        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn memoize_runs_once_across_clones() {
        let calls = Rc::new(Cell::new(0));
        let effect = counting(&calls, 9).memoize();
        let cloned = effect.clone();

        assert_eq!(calls.get(), 0);
        assert_eq!(effect.run(), 9);
        assert_eq!(cloned.run(), 9);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn memoize_caches_errors() {
        let calls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&calls);
        let effect: DeferredEffect<Result<i32, String>> = DeferredEffect::from_fn(move || {
            counted.set(counted.get() + 1);
            Err("down".to_string())
        })
        .memoize();

        assert!(effect.run().is_err());
        assert!(effect.run().is_err());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    #[should_panic]
    fn memoize_rejects_reentrant_first_run() {
        let slot: Rc<RefCell<Option<DeferredEffect<i32>>>> = Rc::new(RefCell::new(None));
        let entered = Rc::new(Cell::new(false));

        let inner_slot = Rc::clone(&slot);
        let effect = DeferredEffect::from_fn(move || {
            if entered.replace(true) {
                return 1;
            }
            let nested = inner_slot.borrow().clone();
            nested.map_or(0, |effect| effect.run()) + 1
        })
        .memoize();
        *slot.borrow_mut() = Some(effect.clone());

        effect.run();
    }

    #[test]
    fn memoize_ok_retries_after_failure() {
        let outcomes = Rc::new(RefCell::new(vec![Ok(3), Err("down".to_string())]));
        let calls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&calls);
        let effect: DeferredEffect<Result<i32, String>> = DeferredEffect::from_fn(move || {
            counted.set(counted.get() + 1);
            outcomes.borrow_mut().pop().unwrap_or(Ok(-1))
        })
        .memoize_ok();

        assert_eq!(effect.run(), Err("down".to_string()));
        assert_eq!(effect.run(), Ok(3));
        assert_eq!(effect.run(), Ok(3));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn fallible_wraps_errors() {
        let effect = DeferredEffect::<Result<i32, Flaky>>::fallible(|| Err(Flaky));
        let err = effect.run().unwrap_err();

        assert_eq!(err.to_string(), "effect execution failed: flaky operation failed");
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.downcast_ref::<Flaky>().is_some());
        assert!(err.downcast_ref::<std::fmt::Error>().is_none());
    }

    #[test]
    fn and_then_skips_continuation_on_error() {
        let continued = Rc::new(Cell::new(false));
        let flag = Rc::clone(&continued);

        let effect: DeferredEffect<Result<i32, String>> =
            DeferredEffect::from_fn(|| Err::<i32, String>("no".to_string())).and_then(move |n: i32| {
                flag.set(true);
                DeferredEffect::of(Ok(n))
            });

        assert_eq!(effect.run(), Err("no".to_string()));
        assert!(!continued.get());
    }

    #[test]
    fn and_then_and_map_ok_compose_successes() {
        let effect: DeferredEffect<Result<i32, String>> = DeferredEffect::of(Ok(2))
            .map_ok(|n| n * 3)
            .and_then(|n| DeferredEffect::of(Ok(n + 1)));

        assert_eq!(effect.run(), Ok(7));
    }

    #[test]
    fn panics_surface_at_run_not_construction() {
        let effect: DeferredEffect<i32> = DeferredEffect::from_fn(|| panic!("boom"));
        let mapped = effect.map(|n| n + 1);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mapped.run()));
        assert!(result.is_err());
    }
}
