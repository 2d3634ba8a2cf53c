//! Testing utilities for Herald.
//!
//! This module provides helpers for asserting on listener invocation.
//!
//! # Features
//!
//! - [`CallLog`]: records the order in which labelled listeners ran
//! - [`CountingListener`]: counts invocations
//! - [`PanicRecorder`]: a panic handler that keeps the recovered messages
//! - [`failing`]: a listener that always returns an error

use herald_core::{BoxError, Event, PanicHandler, panic_message};
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Call Log
// ============================================================================

/// A shared, ordered record of listener invocations.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// emitter.on_with_priority("t", log.listener("high"), Priority::HIGH)?;
/// emitter.on_with_priority("t", log.listener("low"), Priority::LOW)?;
///
/// emitter.emit_sync("t", ());
/// assert_eq!(log.entries(), vec!["high", "low"]);
/// ```
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that appends `label` each time it runs.
    pub fn listener<P>(
        &self,
        label: &str,
    ) -> impl Fn(&Event<P>) -> Result<(), BoxError> + Send + Sync + 'static + use<P> {
        let entries = Arc::clone(&self.entries);
        let label = label.to_owned();
        move |_| {
            entries.lock().push(label.clone());
            Ok(())
        }
    }

    /// A listener that appends the emitted topic name each time it runs.
    pub fn topic_listener<P>(
        &self,
    ) -> impl Fn(&Event<P>) -> Result<(), BoxError> + Send + Sync + 'static + use<P> {
        let entries = Arc::clone(&self.entries);
        move |event| {
            entries.lock().push(event.topic().to_owned());
            Ok(())
        }
    }

    /// Append an entry directly.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// A copy of the recorded entries.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Get the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Clear all recorded entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

// ============================================================================
// Counting Listener
// ============================================================================

/// Counts how often its listeners run.
#[derive(Clone, Default)]
pub struct CountingListener {
    count: Arc<AtomicUsize>,
}

impl CountingListener {
    /// Create a new counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that increments the counter.
    pub fn listener<P>(
        &self,
    ) -> impl Fn(&Event<P>) -> Result<(), BoxError> + Send + Sync + 'static + use<P> {
        let count = Arc::clone(&self.count);
        move |_| {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

// ============================================================================
// Panic Recorder
// ============================================================================

/// Collects the messages of panics recovered during dispatch.
#[derive(Clone, Default)]
pub struct PanicRecorder {
    messages: Arc<Mutex<Vec<String>>>,
}

impl PanicRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A panic handler feeding this recorder.
    pub fn handler(&self) -> PanicHandler {
        let messages = Arc::clone(&self.messages);
        PanicHandler::new(move |payload| {
            messages.lock().push(panic_message(&payload).into_owned());
        })
    }

    /// The recorded panic messages.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Get the number of recorded panics.
    pub fn count(&self) -> usize {
        self.messages.lock().len()
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// A listener that always fails with `message`.
pub fn failing<P>(
    message: &str,
) -> impl Fn(&Event<P>) -> Result<(), BoxError> + Send + Sync + 'static + use<P> {
    let message = message.to_owned();
    move |_| Err(message.clone().into())
}
