//! The stream of errors produced by an asynchronous emission.

use futures::{
    SinkExt, Stream, StreamExt,
    channel::mpsc,
    executor::{self, BlockingStream},
};
use crate::defaults::MAX_ERROR_BUFFER_SIZE;
use herald_core::EmitterError;
use std::{
    pin::Pin,
    task::{Context, Poll},
};

/// Errors from one asynchronous dispatch pass.
///
/// The stream ends when the pass completes. Its buffer is bounded: once it
/// holds `error_buffer_size` undelivered errors the dispatching task blocks
/// until the consumer catches up, so always drain it. Dropping the stream is
/// also fine; remaining errors are then discarded.
#[derive(Debug)]
#[must_use = "drain the stream to observe errors and completion"]
pub struct ErrorStream {
    rx: mpsc::Receiver<EmitterError>,
}

impl ErrorStream {
    /// Creates a connected sink/stream pair holding up to `capacity` errors.
    pub(crate) fn channel(capacity: usize) -> (ErrorSink, ErrorStream) {
        // Each sender owns one guaranteed slot on top of the shared buffer.
        let capacity = capacity.clamp(1, MAX_ERROR_BUFFER_SIZE);
        let (tx, rx) = mpsc::channel(capacity - 1);
        (ErrorSink { tx }, ErrorStream { rx })
    }

    /// A stream that yields a single error and ends.
    pub(crate) fn single(err: EmitterError) -> ErrorStream {
        let (mut tx, rx) = mpsc::channel(0);
        // The sender's own slot is free, so this cannot fail.
        let _ = tx.try_send(err);
        ErrorStream { rx }
    }

    /// Iterates the stream from synchronous code, blocking between items.
    pub fn blocking_iter(self) -> BlockingStream<Self> {
        executor::block_on_stream(self)
    }

    /// Blocks until the pass completes and returns every error it produced.
    pub fn wait(self) -> Vec<EmitterError> {
        self.blocking_iter().collect()
    }
}

impl Stream for ErrorStream {
    type Item = EmitterError;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rx.size_hint()
    }
}

/// Producer half of an [`ErrorStream`].
pub(crate) struct ErrorSink {
    tx: mpsc::Sender<EmitterError>,
}

impl ErrorSink {
    /// Sends an error, blocking while the buffer is full.
    pub(crate) fn send(&mut self, err: EmitterError) {
        if executor::block_on(self.tx.send(err)).is_err() {
            tracing::trace!("error stream dropped by consumer; discarding error");
        }
    }
}
