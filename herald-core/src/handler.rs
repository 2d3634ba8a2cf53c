//! Swappable collaborators consulted by an emitter.
//!
//! Each handler wraps a boxed closure in a sized type so it can live behind an
//! atomically swapped pointer.

use crate::{error::BoxError, event::Event};
use std::{any::Any, borrow::Cow, fmt};

/// The value recovered from a panicking listener.
pub type PanicPayload = Box<dyn Any + Send + 'static>;

/// Renders a panic payload as text, if it carries a message.
pub fn panic_message(payload: &PanicPayload) -> Cow<'_, str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        Cow::Borrowed(s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        Cow::Borrowed(s.as_str())
    } else {
        Cow::Borrowed("Box<dyn Any>")
    }
}

/// Transforms listener errors before they reach the caller.
///
/// Returning `None` swallows the error.
pub struct ErrorHandler<P> {
    inner: Box<dyn Fn(&Event<P>, BoxError) -> Option<BoxError> + Send + Sync + 'static>,
}

impl<P> ErrorHandler<P> {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Event<P>, BoxError) -> Option<BoxError> + Send + Sync + 'static,
    {
        Self { inner: Box::new(f) }
    }

    /// Hands every error through unchanged.
    pub fn passthrough() -> Self {
        Self::new(|_, err| Some(err))
    }

    /// Runs the handler.
    pub fn handle(&self, event: &Event<P>, err: BoxError) -> Option<BoxError> {
        (self.inner)(event, err)
    }
}

impl<P> Default for ErrorHandler<P> {
    fn default() -> Self {
        Self::passthrough()
    }
}

impl<P> fmt::Debug for ErrorHandler<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorHandler")
    }
}

/// Receives the panic recovered from a dispatch pass.
pub struct PanicHandler {
    inner: Box<dyn Fn(PanicPayload) + Send + Sync + 'static>,
}

impl PanicHandler {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(PanicPayload) + Send + Sync + 'static,
    {
        Self { inner: Box::new(f) }
    }

    /// Runs the handler.
    pub fn handle(&self, payload: PanicPayload) {
        (self.inner)(payload)
    }
}

impl fmt::Debug for PanicHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PanicHandler")
    }
}

/// Produces listener ids.
///
/// Ids must be unique with overwhelming probability; collisions are not
/// detected.
pub struct IdGenerator {
    inner: Box<dyn Fn() -> String + Send + Sync + 'static>,
}

impl IdGenerator {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self { inner: Box::new(f) }
    }

    /// Produces the next id.
    pub fn next_id(&self) -> String {
        (self.inner)()
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdGenerator")
    }
}
