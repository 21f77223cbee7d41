//! Statecell: a synchronous reactive state container
//!
//! Statecell follows the "pure core, imperative shell" philosophy. State is
//! computed only by pure transition functions; everything impure happens in
//! interceptors wrapped around dispatch, in procedure commands, or inside
//! deferred effects that run only on request.
//!
//! # Core Concepts
//!
//! - **Command**: an immutable tagged intent (`Action`) or an executable one (`Procedure`)
//! - **Transition**: pure `(state, action) -> state` function
//! - **Interceptors**: composed in onion order around the commit step
//! - **StateContainer**: owns the state, notifies subscribers after each commit
//! - **DeferredEffect**: a lazy, composable description of an impure operation
//!
//! # Example
//!
//! ```rust
//! use statecell::core::{Action, Command, Transition};
//! use statecell::interceptors::{logger, procedures};
//! use statecell::StateContainer;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! let container = StateContainer::builder()
//!     .initial(Counter { count: 0 })
//!     .transition(Transition::new(|state: &Counter, action: &Action| match action.tag.as_str() {
//!         "INC" => Counter { count: state.count + 1 },
//!         _ => state.clone(),
//!     }))
//!     .interceptor(logger())
//!     .interceptor(procedures())
//!     .build()
//!     .unwrap();
//!
//! let notified = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&notified);
//! container.subscribe(move || seen.set(seen.get() + 1));
//!
//! container.dispatch(Command::action("INC")).unwrap();
//! container
//!     .dispatch(Command::procedure("INC_TWICE", |store| {
//!         store.dispatch(Command::action("INC")).unwrap();
//!         store.dispatch(Command::action("INC")).unwrap();
//!     }))
//!     .unwrap();
//!
//! assert_eq!(container.get_state().count, 3);
//! assert_eq!(notified.get(), 3);
//! ```

pub mod builder;
pub mod container;
pub mod core;
pub mod effects;
pub mod interceptors;

// Re-export commonly used types
pub use builder::{ConfigurationError, ContainerBuilder};
pub use container::{
    DispatchError, Interceptor, NotifyPolicy, Outcome, StateContainer, StoreHandle, Subscription,
};
pub use self::core::{Action, Command, State, Transition, TransitionError};
pub use effects::{DeferredEffect, EffectExecutionError};
