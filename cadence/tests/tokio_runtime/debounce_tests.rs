// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::{assert_elapsed_near, reporting_action};
use cadence::{RateLimiter, TokioRateLimiter, TokioRuntime, TriggerOutcome};
use cadence_runtime::TokioTimer;
use cadence_test_utils::test_data::{burst_scenario, SCENARIO_INTERVAL};
use std::time::Duration;
use tokio::time::{advance, sleep, Instant};

#[tokio::test(start_paused = true)]
async fn test_debounce_burst_on_tokio() -> anyhow::Result<()> {
    // Arrange
    let start = Instant::now();
    let (action, mut rx) = reporting_action(start);
    let limiter: TokioRateLimiter<&str> = RateLimiter::debouncer(TokioTimer::current()?);

    // Act
    let mut previous = 0;
    for (at, payload) in burst_scenario() {
        sleep(Duration::from_millis(at - previous)).await;
        previous = at;
        let outcome = limiter.trigger(SCENARIO_INTERVAL, action(), payload, None);
        assert_eq!(outcome, TriggerOutcome::Scheduled);
    }

    // Assert
    let (elapsed, payload) = rx.recv().await.expect("debounced action ran");
    assert_eq!(payload, "D");
    assert_elapsed_near(elapsed, 190);
    sleep(Duration::from_millis(500)).await;
    assert!(rx.try_recv().is_err());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_nothing_runs_before_quiet_period() -> anyhow::Result<()> {
    // Arrange
    let start = Instant::now();
    let (action, mut rx) = reporting_action(start);
    let limiter = RateLimiter::<u32, TokioRuntime>::debouncer(TokioTimer::current()?);

    // Act
    let _ = limiter.trigger(Duration::from_millis(100), action(), 1, None);
    advance(Duration::from_millis(50)).await;

    // Assert
    assert!(rx.try_recv().is_err());
    assert!(limiter.is_pending());
    let (elapsed, payload) = rx.recv().await.expect("debounced action ran");
    assert_eq!(payload, 1);
    assert_elapsed_near(elapsed, 100);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_dispose_aborts_tokio_timer() -> anyhow::Result<()> {
    // Arrange
    let start = Instant::now();
    let (action, mut rx) = reporting_action(start);
    let limiter = RateLimiter::<u32, TokioRuntime>::debouncer(TokioTimer::current()?);
    let _ = limiter.trigger(Duration::from_millis(100), action(), 1, None);

    // Act
    limiter.dispose();
    sleep(Duration::from_millis(500)).await;

    // Assert
    assert!(rx.try_recv().is_err());
    assert_eq!(limiter.stats().executions(), 0);
    assert_eq!(limiter.stats().stale_fires, 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_action_panic_does_not_stop_limiter() -> anyhow::Result<()> {
    // Arrange
    let start = Instant::now();
    let (action, mut rx) = reporting_action(start);
    let limiter = RateLimiter::<u32, TokioRuntime>::debouncer(TokioTimer::current()?);

    // Act
    let _ = limiter.trigger(
        Duration::from_millis(10),
        |_| panic!("action failed"),
        0,
        None,
    );
    sleep(Duration::from_millis(50)).await;
    let _ = limiter.trigger(Duration::from_millis(10), action(), 1, None);

    // Assert
    let (elapsed, payload) = rx.recv().await.expect("second action ran");
    assert_eq!(payload, 1);
    assert_elapsed_near(elapsed, 60);
    Ok(())
}
