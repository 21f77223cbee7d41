//! Effect execution errors.

use std::error::Error;
use thiserror::Error;

/// Failure raised by the operation inside a
/// [`DeferredEffect`](super::DeferredEffect) while it runs.
///
/// It only ever appears as the result of `run()`; building or composing an
/// effect cannot produce it.
#[derive(Debug, Error)]
#[error("effect execution failed: {source}")]
pub struct EffectExecutionError {
    #[source]
    source: Box<dyn Error + 'static>,
}

impl EffectExecutionError {
    /// Wrap the error raised by an operation.
    pub fn new<E>(source: E) -> Self
    where
        E: Error + 'static,
    {
        Self {
            source: Box::new(source),
        }
    }

    /// Try to recover the concrete error raised by the operation.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }
}
