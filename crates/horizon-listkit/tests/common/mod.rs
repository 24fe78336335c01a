//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use horizon_listkit::{List, ListOptions, ManualClock, MemoryRowSource, TraitChangeEvent};
use parking_lot::Mutex;

/// Install a test-writer subscriber once. Set `RUST_LOG` to see list logs.
pub fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Rows are 20px tall and the viewport is 100px, so five rows fit.
pub fn numbered_rows(n: usize) -> MemoryRowSource<usize> {
    MemoryRowSource::new(20.0, 100.0).with_items((0..n).collect())
}

/// A list over `numbered_rows(n)` driven by a manual clock.
pub fn numbered_list(n: usize) -> (List<usize>, Arc<ManualClock>) {
    setup();
    let clock = ManualClock::shared();
    let options = ListOptions::new().with_clock(clock.clone());
    (List::new("tests", numbered_rows(n), options), clock)
}

/// Record the index lists a trait signal delivers.
pub fn record(signal: &horizon_listkit::Signal<TraitChangeEvent>) -> Arc<Mutex<Vec<Vec<usize>>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();
    signal.connect(move |event| log_clone.lock().push(event.indices.clone()));
    log
}
