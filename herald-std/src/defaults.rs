//! Default collaborators for [`MemoryEmitter`](crate::MemoryEmitter).

use herald_core::{ErrorHandler, IdGenerator, PanicHandler, panic_message};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::error;
use uuid::Uuid;

/// Default capacity of the stream returned by an asynchronous emission.
pub const DEFAULT_ERROR_BUFFER_SIZE: usize = 10;

/// Upper bound for the error buffer; larger sizes are clamped to it.
pub const MAX_ERROR_BUFFER_SIZE: usize = 1 << 20;

/// Generates a listener id: 32 hex chars of a random v4 UUID followed by the
/// hex nanosecond timestamp.
pub fn unique_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}{nanos:x}", Uuid::new_v4().simple())
}

/// An [`IdGenerator`] backed by [`unique_id`].
pub fn id_generator() -> IdGenerator {
    IdGenerator::new(unique_id)
}

/// A [`PanicHandler`] that logs the panic and lets the program continue.
pub fn panic_handler() -> PanicHandler {
    PanicHandler::new(|payload| {
        error!(panic = %panic_message(&payload), "listener panicked during dispatch");
    })
}

/// The identity [`ErrorHandler`].
pub fn error_handler<P>() -> ErrorHandler<P> {
    ErrorHandler::passthrough()
}
