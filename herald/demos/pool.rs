//! Runs asynchronous emissions on a bounded worker pool.

use herald::prelude::*;
use std::{
    error::Error,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

static EMISSIONS: usize = 100;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let pool = Arc::new(TokioPool::new(8, 32)?);
    let emitter = MemoryEmitter::<usize>::builder().pool(pool.clone()).build();

    let handled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&handled);
    emitter.on("work.**", move |event| {
        std::thread::sleep(Duration::from_millis(10));
        counter.fetch_add(*event.payload(), Ordering::Relaxed);
        Ok(())
    })?;

    let start = Instant::now();
    let streams: Vec<_> = (1..=EMISSIONS)
        .map(|n| emitter.emit(&format!("work.batch.{}", n % 4), n))
        .collect();
    let failures: usize = streams.into_iter().map(|s| s.wait().len()).sum();

    info!(
        emissions = EMISSIONS,
        failures,
        sum = handled.load(Ordering::Relaxed),
        running = pool.running(),
        elapsed = ?start.elapsed(),
        "all emissions drained"
    );

    emitter.close()?;
    info!(released = pool.is_released(), "emitter closed");
    Ok(())
}
