//! Listener callbacks and their registration options.

use crate::{error::BoxError, event::Event, priority::Priority};
use std::sync::Arc;

/// A listener callback.
///
/// Listeners run synchronously on the thread performing the dispatch pass.
/// Returning an error does not stop other listeners; call
/// [`Event::set_aborted`] for that.
pub type Listener<P> = Arc<dyn Fn(&Event<P>) -> Result<(), BoxError> + Send + Sync + 'static>;

/// Options applied when registering a listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    priority: Priority,
}

impl ListenerOptions {
    /// Default options: [`Priority::NORMAL`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set priority. Values outside `[LOWEST, HIGHEST]` are clamped.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority.clamped();
        self
    }

    /// The effective priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }
}

impl From<Priority> for ListenerOptions {
    fn from(priority: Priority) -> Self {
        ListenerOptions::new().with_priority(priority)
    }
}
