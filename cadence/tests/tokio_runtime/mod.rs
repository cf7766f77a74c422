// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod debounce_tests;
pub mod multi_thread_tests;

use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::Instant;

/// Channel-backed action that reports payloads with their virtual elapsed time.
pub fn reporting_action<P: Send + 'static>(
    start: Instant,
) -> (
    impl Fn() -> Box<dyn FnOnce(P) + Send + 'static>,
    UnboundedReceiver<(Duration, P)>,
) {
    let (tx, rx) = unbounded_channel();
    let make = move || {
        let tx = tx.clone();
        Box::new(move |payload: P| {
            let _ = tx.send((start.elapsed(), payload));
        }) as Box<dyn FnOnce(P) + Send + 'static>
    };
    (make, rx)
}

/// Timer deadlines may round up to the next millisecond tick.
pub fn assert_elapsed_near(actual: Duration, expected_ms: u64) {
    let expected = Duration::from_millis(expected_ms);
    assert!(
        actual >= expected && actual <= expected + Duration::from_millis(2),
        "expected ~{expected:?}, got {actual:?}"
    );
}
