#![allow(dead_code)]

use std::{
    sync::Once,
    thread,
    time::{Duration, Instant},
};

// ============================================================================
// Test Payloads
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id: String,
    pub amount: u64,
}

impl Order {
    pub fn new(id: &str, amount: u64) -> Self {
        Self {
            id: id.to_owned(),
            amount,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Polls `condition` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
