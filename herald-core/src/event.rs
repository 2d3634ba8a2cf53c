//! The event carried through one emission.

use parking_lot::{RwLock, RwLockReadGuard};
use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

/// A topic name, a payload and an abort flag.
///
/// One `Event` is created per emission and shared by reference with every
/// listener that runs for it, across all matching topic patterns. Payload
/// rewrites and the abort flag are therefore visible to later listeners of
/// the same emission.
pub struct Event<P> {
    topic: String,
    payload: RwLock<P>,
    aborted: AtomicBool,
}

impl<P> Event<P> {
    /// Creates a new event.
    pub fn new(topic: impl Into<String>, payload: P) -> Self {
        Self {
            topic: topic.into(),
            payload: RwLock::new(payload),
            aborted: AtomicBool::new(false),
        }
    }

    /// The concrete topic name this event was emitted on.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Read access to the payload.
    ///
    /// Drop the guard before calling [`set_payload`](Self::set_payload) or
    /// [`update_payload`](Self::update_payload) from the same listener.
    pub fn payload(&self) -> RwLockReadGuard<'_, P> {
        self.payload.read()
    }

    /// Replaces the payload.
    pub fn set_payload(&self, payload: P) {
        *self.payload.write() = payload;
    }

    /// Mutates the payload in place.
    pub fn update_payload<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        f(&mut self.payload.write())
    }

    /// Consumes the event and returns the payload.
    pub fn into_payload(self) -> P {
        self.payload.into_inner()
    }

    /// Sets or clears the abort flag.
    ///
    /// Once set, no further listener of the topic currently being triggered
    /// runs for this emission.
    pub fn set_aborted(&self, aborted: bool) {
        self.aborted.store(aborted, Ordering::Release);
    }

    /// Reports whether a listener has aborted this event.
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }
}

impl<P: Clone> Event<P> {
    /// A clone of the current payload.
    pub fn cloned_payload(&self) -> P {
        self.payload.read().clone()
    }
}

impl<P: fmt::Debug> fmt::Debug for Event<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("topic", &self.topic)
            .field("payload", &*self.payload.read())
            .field("aborted", &self.is_aborted())
            .finish()
    }
}
