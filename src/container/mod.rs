//! The imperative shell: a state cell wrapped by an interceptor chain.
//!
//! # Key Concepts
//!
//! - **Container**: owns the state, the transition function and subscribers
//! - **Interceptors**: composed in onion order around the commit step
//! - **Outcome**: what a dispatch hands back (settled, deferred, intercepted)
//! - **Re-entrancy**: transition functions and subscribers cannot dispatch
//!   into the container that is currently committing

mod error;
mod interceptor;
mod outcome;
mod store;
mod subscribers;

pub use error::DispatchError;
pub use interceptor::{dispatch_fn, DispatchFn, Interceptor};
pub use outcome::{Outcome, PendingDispatch};
pub use store::{NotifyPolicy, StateContainer, StoreHandle};
pub use subscribers::Subscription;
