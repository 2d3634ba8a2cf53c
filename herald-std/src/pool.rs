//! A [`Pool`] backed by a Tokio runtime's blocking thread pool.

use herald_core::{Pool, Task};
use parking_lot::{Condvar, Mutex};
use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};

struct PoolState {
    /// Accepted tasks that have not finished yet.
    pending: Mutex<usize>,
    changed: Condvar,
    running: AtomicUsize,
    released: AtomicBool,
}

/// Marks a task as running for as long as it lives, panics included.
struct RunningGuard<'a>(&'a PoolState);

impl<'a> RunningGuard<'a> {
    fn enter(state: &'a PoolState) -> Self {
        state.running.fetch_add(1, Ordering::AcqRel);
        Self(state)
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.running.fetch_sub(1, Ordering::AcqRel);
        let mut pending = self.0.pending.lock();
        *pending -= 1;
        self.0.changed.notify_all();
    }
}

/// A bounded worker pool for asynchronous emissions.
///
/// At most `max_workers` tasks execute at once. `max_capacity` bounds the
/// number of accepted but unfinished tasks; [`submit`](Pool::submit) blocks
/// while the pool is full. A capacity of zero means unbounded. Once released,
/// the pool drops every task submitted to it.
///
/// # Example
///
/// ```rust,ignore
/// let pool = Arc::new(TokioPool::new(5, 1000)?);
/// let emitter = MemoryEmitter::<String>::builder().pool(pool.clone()).build();
/// ```
pub struct TokioPool {
    runtime: Mutex<Option<Runtime>>,
    state: Arc<PoolState>,
    max_workers: usize,
    max_capacity: usize,
}

impl TokioPool {
    /// Creates a pool with its own runtime.
    pub fn new(max_workers: usize, max_capacity: usize) -> io::Result<Self> {
        let max_workers = max_workers.max(1);
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(max_workers)
            .thread_name("herald-pool")
            .build()?;

        Ok(Self {
            runtime: Mutex::new(Some(runtime)),
            state: Arc::new(PoolState {
                pending: Mutex::new(0),
                changed: Condvar::new(),
                running: AtomicUsize::new(0),
                released: AtomicBool::new(false),
            }),
            max_workers,
            max_capacity,
        })
    }

    /// The worker limit.
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Accepted tasks that have not finished yet.
    pub fn pending(&self) -> usize {
        *self.state.pending.lock()
    }
}

impl Pool for TokioPool {
    fn submit(&self, task: Task) {
        {
            let mut pending = self.state.pending.lock();
            loop {
                if self.is_released() {
                    warn!("task submitted to a released pool was dropped");
                    return;
                }
                if self.max_capacity == 0 || *pending < self.max_capacity {
                    break;
                }
                self.state.changed.wait(&mut pending);
            }
            *pending += 1;
        }

        let runtime = self.runtime.lock();
        let Some(runtime) = runtime.as_ref() else {
            let mut pending = self.state.pending.lock();
            *pending -= 1;
            self.state.changed.notify_all();
            warn!("task submitted to a released pool was dropped");
            return;
        };

        let state = Arc::clone(&self.state);
        runtime.spawn_blocking(move || {
            let _running = RunningGuard::enter(&state);
            task();
        });
    }

    fn running(&self) -> usize {
        self.state.running.load(Ordering::Acquire)
    }

    fn release(&self) {
        if self.state.released.swap(true, Ordering::AcqRel) {
            return;
        }

        {
            let mut pending = self.state.pending.lock();
            self.state.changed.notify_all();
            while *pending > 0 {
                self.state.changed.wait(&mut pending);
            }
        }

        if let Some(runtime) = self.runtime.lock().take() {
            runtime.shutdown_background();
        }
        debug!("worker pool released");
    }

    fn is_released(&self) -> bool {
        self.state.released.load(Ordering::Acquire)
    }
}

impl Drop for TokioPool {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.get_mut().take() {
            runtime.shutdown_background();
        }
    }
}
