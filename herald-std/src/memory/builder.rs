//! Builder for [`MemoryEmitter`].

use super::MemoryEmitter;
use crate::defaults::{DEFAULT_ERROR_BUFFER_SIZE, MAX_ERROR_BUFFER_SIZE};
use herald_core::{ErrorHandler, IdGenerator, Message, PanicHandler, Pool};
use std::sync::Arc;

/// Configures a [`MemoryEmitter`].
///
/// Unset slots fall back to the functions in [`defaults`](crate::defaults).
///
/// # Example
/// ```ignore
/// let emitter = MemoryEmitter::<String>::builder()
///     .error_handler(ErrorHandler::new(|_, err| Some(err)))
///     .error_buffer_size(32)
///     .build();
/// ```
pub struct MemoryEmitterBuilder<P: Message> {
    pub(super) error_handler: Option<ErrorHandler<P>>,
    pub(super) id_generator: Option<IdGenerator>,
    pub(super) panic_handler: Option<PanicHandler>,
    pub(super) pool: Option<Arc<dyn Pool>>,
    pub(super) error_buffer_size: usize,
}

impl<P: Message> MemoryEmitterBuilder<P> {
    /// Create a builder with every slot at its default.
    pub fn new() -> Self {
        Self {
            error_handler: None,
            id_generator: None,
            panic_handler: None,
            pool: None,
            error_buffer_size: DEFAULT_ERROR_BUFFER_SIZE,
        }
    }

    /// Set the error-transform hook.
    pub fn error_handler(mut self, handler: ErrorHandler<P>) -> Self {
        self.error_handler = Some(handler);
        self
    }

    /// Set the listener id generator.
    pub fn id_generator(mut self, generator: IdGenerator) -> Self {
        self.id_generator = Some(generator);
        self
    }

    /// Set the panic handler.
    pub fn panic_handler(mut self, handler: PanicHandler) -> Self {
        self.panic_handler = Some(handler);
        self
    }

    /// Run asynchronous emissions on `pool`.
    pub fn pool(mut self, pool: Arc<dyn Pool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Set the capacity of streams returned by `emit`, at most
    /// [`MAX_ERROR_BUFFER_SIZE`].
    pub fn error_buffer_size(mut self, size: usize) -> Self {
        self.error_buffer_size = size.min(MAX_ERROR_BUFFER_SIZE);
        self
    }

    /// Build the emitter.
    pub fn build(self) -> MemoryEmitter<P> {
        MemoryEmitter::from_builder(self)
    }
}

impl<P: Message> Default for MemoryEmitterBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}
