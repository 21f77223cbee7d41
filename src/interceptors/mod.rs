//! Built-in interceptors.
//!
//! Each constructor returns a value implementing
//! [`Interceptor`](crate::container::Interceptor); register them on a
//! [`ContainerBuilder`](crate::builder::ContainerBuilder) in the order they
//! should wrap dispatch. The first registered sees each command first.

mod defer;
mod function;
mod logger;
mod procedure;
mod transform;

pub use defer::{defer_when, DeferWhen};
pub use function::{from_fn, FnInterceptor};
pub use logger::{logger, Logger};
pub use procedure::{procedures, Procedures};
pub use transform::{filter, map_command, Filter, MapCommand};
