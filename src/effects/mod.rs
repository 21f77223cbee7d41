//! Deferred effects for the "imperative shell".
//!
//! Impure work (timers, I/O, clocks) is described as a [`DeferredEffect`]
//! value and executed only on an explicit `run()`.
//!
//! # Key Concepts
//!
//! - **Laziness**: construction and composition never execute anything
//! - **Composition**: `map` and `chain` build new immutable effects
//! - **Caching**: opt-in through `memoize` / `memoize_ok`

mod deferred;
mod error;

pub use deferred::DeferredEffect;
pub use error::EffectExecutionError;
