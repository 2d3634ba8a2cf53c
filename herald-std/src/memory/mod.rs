//! In-memory emitter.
//!
//! [`MemoryEmitter`] owns a concurrent map from topic pattern to [`Topic`].
//! Each emission builds one [`Event`], collects every topic whose pattern
//! matches the emitted name, and triggers them in turn. Any panic during the
//! pass is caught once, handed to the panic handler, and ends the pass.

mod builder;

pub use builder::MemoryEmitterBuilder;

use crate::{defaults, stream::ErrorStream, topic::Topic};
use arc_swap::ArcSwap;
use dashmap::DashMap;
use herald_core::{
    Emitter, EmitterError, ErrorHandler, Event, IdGenerator, Listener, ListenerOptions, Message,
    PanicHandler, Pool, Task, pattern,
};
use parking_lot::RwLock;
use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    thread,
};
use tracing::{debug, error, trace};

struct Shared<P: Message> {
    topics: DashMap<String, Arc<Topic<P>>>,
    error_handler: ArcSwap<ErrorHandler<P>>,
    id_generator: ArcSwap<IdGenerator>,
    panic_handler: ArcSwap<PanicHandler>,
    pool: RwLock<Option<Arc<dyn Pool>>>,
    closed: AtomicBool,
    error_buffer_size: AtomicUsize,
}

impl<P: Message> Shared<P> {
    /// One dispatch pass. `deliver` receives every error the error handler
    /// lets through.
    fn dispatch(&self, topic: &str, payload: P, mut deliver: impl FnMut(EmitterError)) {
        let event = Event::new(topic, payload);

        let pass = panic::catch_unwind(AssertUnwindSafe(|| {
            // Collect first: listeners may register topics while we run.
            let matched: Vec<Arc<Topic<P>>> = self
                .topics
                .iter()
                .filter(|entry| pattern::matches(entry.key(), topic))
                .map(|entry| Arc::clone(entry.value()))
                .collect();
            trace!(topic, matched = matched.len(), "dispatching event");

            // The abort flag is only consulted inside each topic, after a
            // listener returns, so every later topic still runs its first
            // listener.
            for registry in matched {
                for err in registry.trigger(&event) {
                    let handled = self.error_handler.load().handle(&event, err);
                    if let Some(err) = handled {
                        deliver(EmitterError::Listener(err));
                    }
                }
            }
        }));

        if let Err(payload) = pass {
            self.panic_handler.load().handle(payload);
        }
    }
}

/// An in-memory, thread-safe [`Emitter`].
///
/// Cloning is cheap and yields a handle to the same emitter.
///
/// # Example
///
/// ```rust,ignore
/// let emitter = MemoryEmitter::<String>::new();
/// emitter.on_with_priority("order.*", |event| {
///     println!("{} -> {}", event.topic(), *event.payload());
///     Ok(())
/// }, Priority::HIGH)?;
///
/// let errors = emitter.emit_sync("order.created", "A-1".to_string());
/// assert!(errors.is_empty());
/// ```
pub struct MemoryEmitter<P: Message> {
    shared: Arc<Shared<P>>,
}

impl<P: Message> MemoryEmitter<P> {
    /// Create an emitter with default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring an emitter.
    pub fn builder() -> MemoryEmitterBuilder<P> {
        MemoryEmitterBuilder::new()
    }

    fn from_builder(builder: MemoryEmitterBuilder<P>) -> Self {
        Self {
            shared: Arc::new(Shared {
                topics: DashMap::new(),
                error_handler: ArcSwap::from_pointee(
                    builder.error_handler.unwrap_or_else(defaults::error_handler),
                ),
                id_generator: ArcSwap::from_pointee(
                    builder.id_generator.unwrap_or_else(defaults::id_generator),
                ),
                panic_handler: ArcSwap::from_pointee(
                    builder.panic_handler.unwrap_or_else(defaults::panic_handler),
                ),
                pool: RwLock::new(builder.pool),
                closed: AtomicBool::new(false),
                error_buffer_size: AtomicUsize::new(builder.error_buffer_size),
            }),
        }
    }

    /// Reports whether [`close`](Emitter::close) has succeeded.
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }

    /// The patterns that currently have a topic.
    pub fn patterns(&self) -> Vec<String> {
        self.shared
            .topics
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// The installed worker pool, if any.
    pub fn pool(&self) -> Option<Arc<dyn Pool>> {
        self.shared.pool.read().clone()
    }

    /// The capacity used for streams returned by `emit`.
    pub fn error_buffer_size(&self) -> usize {
        self.shared.error_buffer_size.load(Ordering::Relaxed)
    }

    fn spawn(&self, task: Task) {
        if let Some(pool) = self.pool() {
            if !pool.is_released() {
                pool.submit(task);
                return;
            }
            debug!("worker pool is released; dispatching on a fresh task");
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(task);
            }
            Err(_) => {
                if let Err(err) = thread::Builder::new()
                    .name("herald-emit".into())
                    .spawn(task)
                {
                    error!(%err, "failed to spawn dispatch thread");
                }
            }
        }
    }
}

impl<P: Message> Emitter<P> for MemoryEmitter<P> {
    type Topic = Topic<P>;
    type ErrorStream = ErrorStream;

    fn on_with_options(
        &self,
        pattern: &str,
        listener: Option<Listener<P>>,
        options: ListenerOptions,
    ) -> Result<String, EmitterError> {
        let listener = listener.ok_or(EmitterError::NilListener)?;
        if !pattern::is_valid_topic_name(pattern) {
            return Err(EmitterError::InvalidTopicName(pattern.to_owned()));
        }

        let topic = self.ensure_topic(pattern);
        let id = self.shared.id_generator.load().next_id();
        topic.add_listener(id.clone(), listener, options);
        debug!(pattern, listener_id = %id, priority = %options.priority(), "listener registered");
        Ok(id)
    }

    fn off(&self, pattern: &str, listener_id: &str) -> Result<(), EmitterError> {
        self.get_topic(pattern)?.remove_listener(listener_id)?;
        debug!(pattern, listener_id, "listener removed");
        Ok(())
    }

    fn emit(&self, topic: &str, payload: P) -> ErrorStream {
        if self.is_closed() {
            return ErrorStream::single(EmitterError::EmitterClosed);
        }

        let (mut sink, stream) = ErrorStream::channel(self.error_buffer_size());
        let shared = Arc::clone(&self.shared);
        let topic = topic.to_owned();
        self.spawn(Box::new(move || {
            shared.dispatch(&topic, payload, |err| sink.send(err));
        }));
        stream
    }

    fn emit_sync(&self, topic: &str, payload: P) -> Vec<EmitterError> {
        if self.is_closed() {
            return vec![EmitterError::EmitterClosed];
        }

        let mut errors = Vec::new();
        self.shared.dispatch(topic, payload, |err| errors.push(err));
        errors
    }

    fn get_topic(&self, pattern: &str) -> Result<Arc<Topic<P>>, EmitterError> {
        self.shared
            .topics
            .get(pattern)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EmitterError::TopicNotFound(pattern.to_owned()))
    }

    fn ensure_topic(&self, pattern: &str) -> Arc<Topic<P>> {
        if let Some(entry) = self.shared.topics.get(pattern) {
            return Arc::clone(entry.value());
        }
        let entry = self
            .shared
            .topics
            .entry(pattern.to_owned())
            .or_insert_with(|| Arc::new(Topic::new(pattern)));
        Arc::clone(entry.value())
    }

    fn set_error_handler(&self, handler: ErrorHandler<P>) {
        self.shared.error_handler.store(Arc::new(handler));
    }

    fn set_id_generator(&self, generator: IdGenerator) {
        self.shared.id_generator.store(Arc::new(generator));
    }

    fn set_panic_handler(&self, handler: PanicHandler) {
        self.shared.panic_handler.store(Arc::new(handler));
    }

    fn set_pool(&self, pool: Option<Arc<dyn Pool>>) {
        *self.shared.pool.write() = pool;
    }

    fn set_error_buffer_size(&self, size: usize) {
        self.shared
            .error_buffer_size
            .store(size.min(defaults::MAX_ERROR_BUFFER_SIZE), Ordering::Relaxed);
    }

    fn close(&self) -> Result<(), EmitterError> {
        if self
            .shared
            .closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(EmitterError::EmitterAlreadyClosed);
        }

        // Passes already queued on the pool still see the listeners.
        if let Some(pool) = self.pool() {
            pool.release();
        }
        self.shared.topics.clear();
        debug!("emitter closed");
        Ok(())
    }
}

impl<P: Message> Clone for MemoryEmitter<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<P: Message> Default for MemoryEmitter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Message> fmt::Debug for MemoryEmitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryEmitter")
            .field("topics", &self.shared.topics.len())
            .field("closed", &self.is_closed())
            .field("error_buffer_size", &self.error_buffer_size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::PanicRecorder;
    use herald_core::Priority;
    use parking_lot::Mutex;

    #[test]
    fn on_rejects_missing_listener_and_bad_patterns() {
        let emitter = MemoryEmitter::<()>::new();

        let err = emitter
            .on_with_options("a", None, ListenerOptions::new())
            .unwrap_err();
        assert!(matches!(err, EmitterError::NilListener));

        for bad in ["", "a.?", "a.[b]"] {
            let err = emitter.on(bad, |_| Ok(())).unwrap_err();
            assert!(matches!(err, EmitterError::InvalidTopicName(_)), "{bad:?}");
        }
        assert!(emitter.patterns().is_empty());
    }

    #[test]
    fn on_uses_configured_id_generator() {
        let counter = Arc::new(AtomicUsize::new(0));
        let next = Arc::clone(&counter);
        let emitter = MemoryEmitter::<()>::builder()
            .id_generator(IdGenerator::new(move || {
                format!("id-{}", next.fetch_add(1, Ordering::SeqCst))
            }))
            .build();

        assert_eq!(emitter.on("a", |_| Ok(())).unwrap(), "id-0");
        assert_eq!(emitter.on("a", |_| Ok(())).unwrap(), "id-1");
        assert_eq!(emitter.get_topic("a").unwrap().listener_ids(), vec!["id-0", "id-1"]);
    }

    #[test]
    fn off_reports_missing_topic_and_listener() {
        let emitter = MemoryEmitter::<()>::new();
        assert!(matches!(
            emitter.off("nope", "x"),
            Err(EmitterError::TopicNotFound(_))
        ));

        let id = emitter.on("a", |_| Ok(())).unwrap();
        assert!(matches!(
            emitter.off("a", "x"),
            Err(EmitterError::ListenerNotFound(_))
        ));
        emitter.off("a", &id).unwrap();

        // The emptied topic stays registered.
        assert!(emitter.get_topic("a").unwrap().is_empty());
    }

    #[test]
    fn ensure_topic_reuses_existing_topic() {
        let emitter = MemoryEmitter::<()>::new();
        let first = emitter.ensure_topic("a.b");
        let second = emitter.ensure_topic("a.b");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.pattern(), "a.b");
    }

    #[test]
    fn error_handler_transforms_and_swallows() {
        let emitter = MemoryEmitter::<()>::new();
        emitter.on("t", |_| Err("keep".into())).unwrap();
        emitter.on("t", |_| Err("drop".into())).unwrap();
        emitter.set_error_handler(ErrorHandler::new(|event, err| {
            if err.to_string() == "drop" {
                None
            } else {
                Some(format!("{}: {err}", event.topic()).into())
            }
        }));

        let errors = emitter.emit_sync("t", ());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "t: keep");
    }

    #[test]
    fn panic_ends_the_pass_and_reaches_handler_once() {
        let recorder = PanicRecorder::new();
        let emitter = MemoryEmitter::<()>::builder()
            .panic_handler(recorder.handler())
            .build();
        let after = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&after);

        emitter
            .on_with_priority("t", |_| panic!("listener exploded"), Priority::HIGH)
            .unwrap();
        emitter
            .on_with_priority(
                "t",
                move |_| {
                    flag.store(true, Ordering::SeqCst);
                    Ok(())
                },
                Priority::LOW,
            )
            .unwrap();

        let errors = emitter.emit_sync("t", ());
        assert!(errors.is_empty());
        assert_eq!(recorder.messages(), vec!["listener exploded"]);
        assert!(!after.load(Ordering::SeqCst));
    }

    #[test]
    fn listeners_may_register_during_dispatch() {
        let emitter = MemoryEmitter::<()>::new();
        let inner = emitter.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);

        emitter
            .on("setup", move |event| {
                log.lock().push(event.topic().to_owned());
                inner.on("late.topic", |_| Ok(()))?;
                Ok(())
            })
            .unwrap();

        assert!(emitter.emit_sync("setup", ()).is_empty());
        assert_eq!(*seen.lock(), vec!["setup"]);
        assert!(emitter.get_topic("late.topic").is_ok());
    }

    #[test]
    fn close_is_single_shot() {
        let emitter = MemoryEmitter::<()>::new();
        emitter.on("a", |_| Ok(())).unwrap();

        emitter.close().unwrap();
        assert!(emitter.is_closed());
        assert!(matches!(
            emitter.close(),
            Err(EmitterError::EmitterAlreadyClosed)
        ));
        assert!(matches!(
            emitter.get_topic("a"),
            Err(EmitterError::TopicNotFound(_))
        ));
    }
}
