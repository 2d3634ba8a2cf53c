use herald::{
    Emitter, MemoryEmitter, Pool, TokioPool,
    testing::{CountingListener, failing},
};
use std::{sync::Arc, thread, time::Duration};

mod common;
use common::init_tracing;

#[test]
fn test_emit_with_pool() {
    init_tracing();
    let pool = Arc::new(TokioPool::new(5, 1000).unwrap());
    let emitter = MemoryEmitter::<String>::builder().pool(pool.clone()).build();
    let counter = CountingListener::new();
    emitter.on("test_topic", counter.listener()).unwrap();

    let errors = emitter.emit("test_topic", "payload".into()).wait();
    assert!(errors.is_empty());
    assert_eq!(counter.count(), 1);
    assert!(emitter.pool().is_some());
}

#[test]
fn test_multiple_events_with_pool() {
    let pool = TokioPool::new(3, 10).unwrap();
    let emitter = MemoryEmitter::<usize>::new();
    emitter.set_pool(Some(Arc::new(pool)));
    let counter = CountingListener::new();
    emitter.on("job.*", counter.listener()).unwrap();
    emitter.on("job.7", failing("seven")).unwrap();

    let streams: Vec<_> = (0..20)
        .map(|n| emitter.emit(&format!("job.{n}"), n))
        .collect();
    let errors: Vec<_> = streams.into_iter().flat_map(|s| s.wait()).collect();

    assert_eq!(counter.count(), 20);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "seven");
}

#[test]
fn test_close_releases_pool() {
    // One worker: most passes are still queued when close starts.
    let pool = Arc::new(TokioPool::new(1, 0).unwrap());
    let emitter = MemoryEmitter::<()>::builder().pool(pool.clone()).build();
    let counter = CountingListener::new();
    let inner = counter.listener();
    emitter
        .on("slow", move |event| {
            thread::sleep(Duration::from_millis(30));
            inner(event)
        })
        .unwrap();

    let streams: Vec<_> = (0..4).map(|_| emitter.emit("slow", ())).collect();
    emitter.close().unwrap();

    // Close waits for the pool to drain.
    assert!(pool.is_released());
    assert_eq!(pool.running(), 0);
    assert_eq!(pool.pending(), 0);
    assert_eq!(counter.count(), 4);
    for stream in streams {
        assert!(stream.wait().is_empty());
    }
}

#[test]
fn test_pool_can_be_removed() {
    let pool = Arc::new(TokioPool::new(1, 0).unwrap());
    let emitter = MemoryEmitter::<()>::builder().pool(pool.clone()).build();
    emitter.set_pool(None);
    assert!(emitter.pool().is_none());

    let counter = CountingListener::new();
    emitter.on("t", counter.listener()).unwrap();
    assert!(emitter.emit("t", ()).wait().is_empty());
    assert_eq!(counter.count(), 1);

    emitter.close().unwrap();
    assert!(!pool.is_released());
}

#[test]
fn test_released_shared_pool_falls_back_to_fresh_task() {
    let pool = Arc::new(TokioPool::new(2, 0).unwrap());
    let first = MemoryEmitter::<()>::builder().pool(pool.clone()).build();
    let second = MemoryEmitter::<()>::builder().pool(pool.clone()).build();
    first.close().unwrap();
    assert!(pool.is_released());

    let counter = CountingListener::new();
    second.on("t", counter.listener()).unwrap();
    second.on("t", failing("still reported")).unwrap();

    let errors = second.emit("t", ()).wait();
    assert_eq!(errors.len(), 1);
    assert_eq!(counter.count(), 1);
}
