//! The listener registry for a single topic pattern.

use herald_core::{BoxError, EmitterError, Event, Listener, ListenerOptions, Priority};
use parking_lot::RwLock;
use std::{collections::HashMap, fmt, sync::Arc};

/// A registered listener.
struct Entry<P> {
    id: String,
    listener: Listener<P>,
    priority: Priority,
}

struct Listeners<P> {
    by_id: HashMap<String, Arc<Entry<P>>>,
    /// Descending priority; equal priorities in registration order.
    ordered: Vec<Arc<Entry<P>>>,
}

impl<P> Listeners<P> {
    fn unlink(&mut self, id: &str, priority: Priority) {
        let start = self.ordered.partition_point(|e| e.priority > priority);
        if let Some(offset) = self.ordered[start..].iter().position(|e| e.id == id) {
            self.ordered.remove(start + offset);
        }
    }
}

/// The listeners subscribed under one topic pattern, kept in priority order.
///
/// Higher priorities run first. Listeners of equal priority run in the order
/// they were added.
pub struct Topic<P> {
    pattern: String,
    inner: RwLock<Listeners<P>>,
}

impl<P> Topic<P> {
    /// Creates an empty topic for `pattern`.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            inner: RwLock::new(Listeners {
                by_id: HashMap::new(),
                ordered: Vec::new(),
            }),
        }
    }

    /// The pattern this topic was created for.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Adds a listener under `id`.
    ///
    /// Ids are expected to be unique; adding an id that is already present
    /// replaces the earlier listener.
    pub fn add_listener(&self, id: impl Into<String>, listener: Listener<P>, options: ListenerOptions) {
        let id = id.into();
        let priority = options.priority();
        let entry = Arc::new(Entry {
            id: id.clone(),
            listener,
            priority,
        });

        let mut inner = self.inner.write();
        if let Some(previous) = inner.by_id.insert(id, Arc::clone(&entry)) {
            inner.unlink(&previous.id, previous.priority);
        }
        let index = inner.ordered.partition_point(|e| e.priority >= priority);
        inner.ordered.insert(index, entry);
    }

    /// Removes the listener registered under `id`.
    pub fn remove_listener(&self, id: &str) -> Result<(), EmitterError> {
        let mut inner = self.inner.write();
        let entry = inner
            .by_id
            .remove(id)
            .ok_or_else(|| EmitterError::ListenerNotFound(id.to_owned()))?;
        inner.unlink(&entry.id, entry.priority);
        Ok(())
    }

    /// Invokes the listeners with `event`, highest priority first.
    ///
    /// Errors are collected rather than stopping iteration. The abort flag is
    /// checked after each listener returns; once set, the remaining listeners
    /// of this topic are skipped. The listener set is captured when the call
    /// starts, so listeners may register or remove listeners without
    /// deadlocking.
    pub fn trigger(&self, event: &Event<P>) -> Vec<BoxError> {
        let snapshot: Vec<Arc<Entry<P>>> = self.inner.read().ordered.clone();

        let mut errors = Vec::new();
        for entry in snapshot {
            if let Err(err) = (entry.listener)(event) {
                errors.push(err);
            }
            if event.is_aborted() {
                break;
            }
        }
        errors
    }

    /// Listener ids in invocation order.
    pub fn listener_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .ordered
            .iter()
            .map(|e| e.id.clone())
            .collect()
    }

    /// The priority a listener was registered with.
    pub fn priority_of(&self, id: &str) -> Option<Priority> {
        self.inner.read().by_id.get(id).map(|e| e.priority)
    }

    /// Reports whether a listener is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().by_id.contains_key(id)
    }

    /// Get the number of registered listeners.
    pub fn len(&self) -> usize {
        self.inner.read().ordered.len()
    }

    /// Check if the topic has no listeners.
    pub fn is_empty(&self) -> bool {
        self.inner.read().ordered.is_empty()
    }
}

impl<P> fmt::Debug for Topic<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topic")
            .field("pattern", &self.pattern)
            .field("listeners", &self.len())
            .finish()
    }
}
