//! The emitter contract.

use crate::{
    error::{BoxError, EmitterError},
    event::Event,
    handler::{ErrorHandler, IdGenerator, PanicHandler},
    listener::{Listener, ListenerOptions},
    message::Message,
    pool::Pool,
    priority::Priority,
};
use std::sync::Arc;

/// An event emitter: registration, emission and lifecycle.
///
/// Listeners are registered against topic patterns (see [`pattern`]) and
/// invoked in priority order whenever an emitted topic name matches.
///
/// [`pattern`]: crate::pattern
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `Emitter` for payload `{P}`",
    label = "missing `Emitter` implementation"
)]
pub trait Emitter<P: Message>: Send + Sync {
    /// The per-pattern listener registry.
    type Topic;

    /// What [`emit`](Self::emit) hands back to drain errors asynchronously.
    type ErrorStream;

    /// Registers a listener under `pattern`.
    ///
    /// Returns the listener id, or [`EmitterError::NilListener`] when
    /// `listener` is `None` and [`EmitterError::InvalidTopicName`] when the
    /// pattern is empty or contains `?` or `[`.
    fn on_with_options(
        &self,
        pattern: &str,
        listener: Option<Listener<P>>,
        options: ListenerOptions,
    ) -> Result<String, EmitterError>;

    /// Registers a closure at [`Priority::NORMAL`].
    fn on<F>(&self, pattern: &str, listener: F) -> Result<String, EmitterError>
    where
        Self: Sized,
        F: Fn(&Event<P>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.on_with_options(pattern, Some(Arc::new(listener)), ListenerOptions::new())
    }

    /// Registers a closure at the given priority (clamped into range).
    fn on_with_priority<F>(
        &self,
        pattern: &str,
        listener: F,
        priority: Priority,
    ) -> Result<String, EmitterError>
    where
        Self: Sized,
        F: Fn(&Event<P>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.on_with_options(
            pattern,
            Some(Arc::new(listener)),
            ListenerOptions::new().with_priority(priority),
        )
    }

    /// Removes a listener by id.
    fn off(&self, pattern: &str, listener_id: &str) -> Result<(), EmitterError>;

    /// Dispatches asynchronously; errors arrive on the returned stream, which
    /// ends once the dispatch pass completes.
    fn emit(&self, topic: &str, payload: P) -> Self::ErrorStream;

    /// Dispatches on the calling thread and returns the collected errors.
    fn emit_sync(&self, topic: &str, payload: P) -> Vec<EmitterError>;

    /// Looks up the registry for an exact pattern string.
    fn get_topic(&self, pattern: &str) -> Result<Arc<Self::Topic>, EmitterError>;

    /// Returns the registry for `pattern`, creating it if absent.
    fn ensure_topic(&self, pattern: &str) -> Arc<Self::Topic>;

    /// Replaces the error-transform hook.
    fn set_error_handler(&self, handler: ErrorHandler<P>);

    /// Replaces the listener id generator.
    fn set_id_generator(&self, generator: IdGenerator);

    /// Replaces the panic handler.
    fn set_panic_handler(&self, handler: PanicHandler);

    /// Installs or removes the worker pool used by [`emit`](Self::emit).
    fn set_pool(&self, pool: Option<Arc<dyn Pool>>);

    /// Sets the capacity of streams returned by later [`emit`](Self::emit) calls.
    fn set_error_buffer_size(&self, size: usize);

    /// Closes the emitter. A second call fails with
    /// [`EmitterError::EmitterAlreadyClosed`].
    fn close(&self) -> Result<(), EmitterError>;
}
