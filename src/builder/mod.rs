//! Builder API for ergonomic container construction.
//!
//! The builder collects the initial state, the transition function, the
//! ordered interceptors and the notification policy, and validates them
//! all at once before assembling the container.

pub mod container;
pub mod error;

pub use container::ContainerBuilder;
pub use error::{ConfigIssue, ConfigurationError};
