// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence::{Mode, RateLimiter, TriggerOutcome};
use cadence_test_utils::{
    helpers::{advance_millis, advance_to_millis, assert_executions},
    test_data::{burst_scenario, SCENARIO_INTERVAL},
    ManualInstant, ManualRuntime, ManualTimer, Recorder,
};
use std::time::Duration;

fn throttler<P: Send + 'static>(timer: &ManualTimer) -> RateLimiter<P, ManualRuntime> {
    RateLimiter::throttler(timer.clone())
}

#[test]
fn test_throttle_first_trigger_runs_synchronously() {
    // Arrange
    let timer = ManualTimer::new();
    let recorder = Recorder::new(timer.clone());
    let limiter = throttler(&timer);

    // Act
    let outcome = limiter.trigger(SCENARIO_INTERVAL, recorder.action(), "A", None);

    // Assert: ran before trigger returned, no timer involved
    assert_eq!(outcome, TriggerOutcome::Executed);
    assert_executions(&recorder, &[(0, "A")]);
    assert!(!limiter.is_pending());
    assert_eq!(timer.pending_count(), 0);
    assert_eq!(limiter.mode(), Mode::Throttle);
}

#[test]
fn test_throttle_burst_runs_leading_and_trailing() {
    // Arrange
    let timer = ManualTimer::new();
    let recorder = Recorder::new(timer.clone());
    let limiter = throttler(&timer);
    let mut outcomes = Vec::new();

    // Act
    for (at, payload) in burst_scenario() {
        advance_to_millis(&timer, at);
        outcomes.push(limiter.trigger(SCENARIO_INTERVAL, recorder.action(), payload, None));
    }
    advance_millis(&timer, 500);

    // Assert
    assert_eq!(
        outcomes,
        vec![
            TriggerOutcome::Executed,
            TriggerOutcome::Scheduled,
            TriggerOutcome::Scheduled,
            TriggerOutcome::Scheduled,
        ]
    );
    assert_executions(&recorder, &[(0, "A"), (100, "D")]);
}

#[test]
fn test_throttle_trailing_run_lands_on_window_boundary() {
    // Arrange
    let timer = ManualTimer::new();
    let recorder = Recorder::new(timer.clone());
    let limiter = throttler(&timer);
    let _ = limiter.trigger(Duration::from_millis(100), recorder.action(), "A", None);

    // Act
    advance_millis(&timer, 40);
    let outcome = limiter.trigger(Duration::from_millis(100), recorder.action(), "B", None);

    // Assert: armed for the remaining 60ms
    assert_eq!(outcome, TriggerOutcome::Scheduled);
    assert_eq!(timer.next_due(), Some(ManualInstant::from_millis(100)));
    advance_millis(&timer, 59);
    assert_executions(&recorder, &[(0, "A")]);
    advance_millis(&timer, 1);
    assert_executions(&recorder, &[(0, "A"), (100, "B")]);
}

#[test]
fn test_throttle_trailing_run_starts_a_new_window() {
    // Arrange
    let timer = ManualTimer::new();
    let recorder = Recorder::new(timer.clone());
    let limiter = throttler(&timer);

    // Act
    let _ = limiter.trigger(Duration::from_millis(100), recorder.action(), "A", None);
    advance_millis(&timer, 40);
    let _ = limiter.trigger(Duration::from_millis(100), recorder.action(), "B", None);
    advance_to_millis(&timer, 120);
    let outcome = limiter.trigger(Duration::from_millis(100), recorder.action(), "C", None);
    advance_millis(&timer, 200);

    // Assert: C is measured from B's execution at 100, not from A
    assert_eq!(outcome, TriggerOutcome::Scheduled);
    assert_executions(&recorder, &[(0, "A"), (100, "B"), (200, "C")]);
}

#[test]
fn test_throttle_runs_immediately_again_after_quiet_period() {
    // Arrange
    let timer = ManualTimer::new();
    let recorder = Recorder::new(timer.clone());
    let limiter = throttler(&timer);
    let _ = limiter.trigger(Duration::from_millis(100), recorder.action(), 1, None);

    // Act
    advance_millis(&timer, 100);
    let outcome = limiter.trigger(Duration::from_millis(100), recorder.action(), 2, None);

    // Assert
    assert_eq!(outcome, TriggerOutcome::Executed);
    assert_executions(&recorder, &[(0, 1), (100, 2)]);
}

#[test]
fn test_throttle_caps_cadence_under_steady_stream() {
    // Arrange
    let timer = ManualTimer::new();
    let recorder = Recorder::new(timer.clone());
    let limiter = throttler(&timer);

    // Act: a trigger every 10ms for 350ms
    for at in (0..350).step_by(10) {
        advance_to_millis(&timer, at);
        let _ = limiter.trigger(Duration::from_millis(100), recorder.action(), at, None);
    }
    advance_millis(&timer, 500);

    // Assert
    assert_executions(
        &recorder,
        &[(0, 0), (100, 90), (200, 190), (300, 290), (400, 340)],
    );
    let stats = limiter.stats();
    assert_eq!(stats.immediate, 1);
    assert_eq!(stats.trailing, 4);
}

#[test]
fn test_throttle_zero_interval_always_runs_immediately() {
    let timer = ManualTimer::new();
    let recorder = Recorder::new(timer.clone());
    let limiter = throttler(&timer);

    for value in 0..3 {
        let outcome = limiter.trigger(Duration::ZERO, recorder.action(), value, None);
        assert_eq!(outcome, TriggerOutcome::Executed);
    }

    assert_executions(&recorder, &[(0, 0), (0, 1), (0, 2)]);
    assert_eq!(timer.pending_count(), 0);
}

#[test]
fn test_throttle_immediate_run_cancels_stale_pending_timer() {
    // Arrange: pending trailing run for a short window
    let timer = ManualTimer::new();
    let recorder = Recorder::new(timer.clone());
    let limiter = throttler(&timer);
    let _ = limiter.trigger(Duration::from_millis(100), recorder.action(), "A", None);
    advance_millis(&timer, 10);
    let _ = limiter.trigger(Duration::from_millis(100), recorder.action(), "B", None);

    // Act: a trigger with a shorter interval is already outside its window
    advance_millis(&timer, 10);
    let outcome = limiter.trigger(Duration::from_millis(5), recorder.action(), "C", None);
    advance_millis(&timer, 200);

    // Assert: B was superseded and never runs
    assert_eq!(outcome, TriggerOutcome::Executed);
    assert_executions(&recorder, &[(0, "A"), (20, "C")]);
    assert_eq!(timer.pending_count(), 0);
}
