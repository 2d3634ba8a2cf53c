//! Error types for Herald.
//!
//! Every failure an emitter can report is a variant of [`EmitterError`]:
//!
//! - registration: [`EmitterError::NilListener`], [`EmitterError::InvalidTopicName`]
//! - lookup: [`EmitterError::TopicNotFound`], [`EmitterError::ListenerNotFound`]
//! - lifecycle: [`EmitterError::EmitterClosed`], [`EmitterError::EmitterAlreadyClosed`]
//! - listener failures: [`EmitterError::Listener`]

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by an [`Emitter`](crate::Emitter).
#[derive(Error, Debug)]
pub enum EmitterError {
    /// A registration was attempted without a listener.
    #[error("listener cannot be nil")]
    NilListener,

    /// The topic pattern is empty or contains reserved characters.
    #[error("invalid topic name: {0:?}")]
    InvalidTopicName(String),

    /// No topic has been created for the pattern.
    #[error("topic not found: unable to find topic '{0}'")]
    TopicNotFound(String),

    /// The topic holds no listener with the given id.
    #[error("listener not found: {0}")]
    ListenerNotFound(String),

    /// The emitter was closed before the call.
    #[error("emitter is closed")]
    EmitterClosed,

    /// `close` was called on an emitter that is already closed.
    #[error("emitter is already closed")]
    EmitterAlreadyClosed,

    /// A listener returned an error that the error handler let through.
    #[error(transparent)]
    Listener(BoxError),
}

impl EmitterError {
    /// Returns `true` if this error came from a listener callback.
    pub fn is_listener(&self) -> bool {
        matches!(self, EmitterError::Listener(_))
    }

    /// Unwraps the listener error, if this is one.
    pub fn into_listener_error(self) -> Option<BoxError> {
        match self {
            EmitterError::Listener(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoxError> for EmitterError {
    fn from(err: BoxError) -> Self {
        EmitterError::Listener(err)
    }
}
