use futures::StreamExt;
use herald::{
    Emitter, EmitterError, MemoryEmitter, Priority,
    defaults::MAX_ERROR_BUFFER_SIZE,
    testing::{CallLog, CountingListener, PanicRecorder, failing},
};
use std::{thread, time::Duration};

mod common;
use common::{Order, init_tracing, wait_until};

#[tokio::test]
async fn test_emit_async_success() {
    init_tracing();
    let emitter = MemoryEmitter::<Order>::new();
    let counter = CountingListener::new();
    emitter.on("order.created", counter.listener()).unwrap();

    let errors: Vec<_> = emitter
        .emit("order.created", Order::new("A-1", 10))
        .collect()
        .await;
    assert!(errors.is_empty());
    assert_eq!(counter.count(), 1);
}

#[tokio::test]
async fn test_emit_async_failure() {
    let emitter = MemoryEmitter::<()>::new();
    emitter.on("test_topic", failing("listener error")).unwrap();

    let errors: Vec<_> = emitter.emit("test_topic", ()).collect().await;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "listener error");
}

#[tokio::test]
async fn test_emit_async_keeps_priority_order() {
    let emitter = MemoryEmitter::<()>::new();
    let log = CallLog::new();
    emitter
        .on_with_priority("audit.*", log.listener("low"), Priority::LOW)
        .unwrap();
    emitter
        .on_with_priority("audit.*", log.listener("high"), Priority::HIGH)
        .unwrap();

    let errors: Vec<_> = emitter.emit("audit.login", ()).collect().await;
    assert!(errors.is_empty());
    assert_eq!(log.entries(), vec!["high", "low"]);
}

#[test]
fn test_wait_without_runtime() {
    let emitter = MemoryEmitter::<()>::new();
    let counter = CountingListener::new();
    emitter.on("t", counter.listener()).unwrap();
    emitter.on("t", failing("nope")).unwrap();

    let errors = emitter.emit("t", ()).wait();
    assert_eq!(errors.len(), 1);
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_blocking_iter_yields_each_error() {
    let emitter = MemoryEmitter::<()>::new();
    emitter.on("t", failing("one")).unwrap();
    emitter.on("t", failing("two")).unwrap();

    let mut messages: Vec<String> = emitter
        .emit("t", ())
        .blocking_iter()
        .map(|err| err.to_string())
        .collect();
    messages.sort();
    assert_eq!(messages, vec!["one", "two"]);
}

#[test]
fn test_small_buffer_delivers_every_error() {
    let emitter = MemoryEmitter::<()>::builder().error_buffer_size(1).build();
    for _ in 0..5 {
        emitter.on("t", failing("busy")).unwrap();
    }

    let errors = emitter.emit("t", ()).wait();
    assert_eq!(errors.len(), 5);
}

#[test]
fn test_dropped_stream_does_not_block_dispatch() {
    let emitter = MemoryEmitter::<()>::builder().error_buffer_size(1).build();
    let counter = CountingListener::new();
    for _ in 0..5 {
        emitter.on("t", failing("unread")).unwrap();
    }
    emitter
        .on_with_priority("t", counter.listener(), Priority::LOWEST)
        .unwrap();

    drop(emitter.emit("t", ()));
    assert!(wait_until(Duration::from_secs(2), || counter.count() == 1));

    // A later synchronous pass is unaffected.
    assert_eq!(emitter.emit_sync("t", ()).len(), 5);
}

#[test]
fn test_set_error_buffer_size_applies_to_later_emits() {
    let emitter = MemoryEmitter::<()>::new();
    assert_eq!(emitter.error_buffer_size(), 10);
    emitter.set_error_buffer_size(2);
    assert_eq!(emitter.error_buffer_size(), 2);

    for _ in 0..4 {
        emitter.on("t", failing("e")).unwrap();
    }
    assert_eq!(emitter.emit("t", ()).wait().len(), 4);
}

#[test]
fn test_oversized_error_buffer_is_clamped() {
    let emitter = MemoryEmitter::<()>::new();
    emitter.set_error_buffer_size(usize::MAX);
    assert_eq!(emitter.error_buffer_size(), MAX_ERROR_BUFFER_SIZE);

    emitter.on("t", failing("e")).unwrap();
    assert_eq!(emitter.emit("t", ()).wait().len(), 1);

    let built = MemoryEmitter::<()>::builder()
        .error_buffer_size(usize::MAX)
        .build();
    assert_eq!(built.error_buffer_size(), MAX_ERROR_BUFFER_SIZE);
    assert!(built.emit("t", ()).wait().is_empty());
}

#[tokio::test]
async fn test_emit_async_panic_reported_once() {
    let recorder = PanicRecorder::new();
    let emitter = MemoryEmitter::<()>::new();
    emitter.set_panic_handler(recorder.handler());
    emitter.on("t", |_| panic!("async panic")).unwrap();

    let errors: Vec<_> = emitter.emit("t", ()).collect().await;
    assert!(errors.is_empty());
    assert_eq!(recorder.messages(), vec!["async panic"]);
}

#[tokio::test]
async fn test_emit_async_after_close() {
    let emitter = MemoryEmitter::<()>::new();
    emitter.close().unwrap();

    let errors: Vec<_> = emitter.emit("t", ()).collect().await;
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], EmitterError::EmitterClosed));
}

#[test]
fn test_emit_returns_before_listeners_finish() {
    let emitter = MemoryEmitter::<()>::new();
    let counter = CountingListener::new();
    let inner = counter.listener();
    emitter
        .on("slow", move |event| {
            thread::sleep(Duration::from_millis(100));
            inner(event)
        })
        .unwrap();

    let stream = emitter.emit("slow", ());
    assert_eq!(counter.count(), 0);
    assert!(stream.wait().is_empty());
    assert_eq!(counter.count(), 1);
}
