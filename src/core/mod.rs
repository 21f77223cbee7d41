//! Core value types of the container.
//!
//! This module contains the pure functional core:
//! - State snapshots via the `State` trait
//! - Commands (`Action` and `Procedure`) describing intents
//! - Transition functions computing the next state
//!
//! Nothing in this module holds mutable state or performs I/O.

mod command;
mod state;
mod transition;

pub use command::{Action, Command, Procedure};
pub use state::State;
pub use transition::{Transition, TransitionError};
