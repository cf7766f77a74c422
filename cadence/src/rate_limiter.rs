// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The debounce/throttle state machine.
//!
//! Every transition happens under one mutex, including the one made by a fired
//! timer, so trigger calls and timer callbacks are totally ordered per limiter.
//! User actions never run while that mutex is held, which keeps re-entrant
//! triggers from inside an action legal.

mod state;

use crate::config::{interval_from_millis, RateLimiterConfig};
use crate::mode::Mode;
use crate::outcome::{SkipReason, TriggerOutcome};
use crate::stats::RateLimiterStats;
use cadence_error::Result;
use cadence_runtime::{Runner, Runtime, TimerService};
use core::fmt;
use parking_lot::Mutex;
use state::{Pending, State};
use std::sync::{Arc, Weak};
use std::time::Duration;

struct Shared<P, R: Runtime> {
    mode: Mode,
    timer: R::Timer,
    state: Mutex<State<P, R>>,
}

/// Rate limiter for one event source, in either [`Mode::Debounce`] or
/// [`Mode::Throttle`].
///
/// At most one timer is pending at any time, and the action that eventually runs
/// is always the one submitted by the latest trigger. Share it between threads
/// with an `Arc`; dropping it disposes it.
///
/// # Example
///
/// ```
/// use cadence::{RateLimiter, TriggerOutcome};
/// use cadence_runtime::InlineRunner;
/// use cadence_test_utils::{ManualRuntime, ManualTimer, Recorder};
/// use std::time::Duration;
///
/// let timer = ManualTimer::new();
/// let recorder = Recorder::new(timer.clone());
/// let search = RateLimiter::<&str, ManualRuntime>::debouncer(timer.clone());
/// let interval = Duration::from_millis(100);
///
/// for text in ["r", "ru", "rus", "rust"] {
///     let outcome = search.trigger(interval, recorder.action(), text, Some(InlineRunner));
///     assert_eq!(outcome, TriggerOutcome::Scheduled);
///     timer.advance(Duration::from_millis(30));
/// }
///
/// timer.advance(interval);
/// assert_eq!(recorder.executions(), vec![(190, "rust")]);
/// ```
pub struct RateLimiter<P, R: Runtime> {
    shared: Arc<Shared<P, R>>,
    interval: Duration,
}

impl<P, R: Runtime> RateLimiter<P, R> {
    /// Creates an idle limiter in `mode` whose timers are armed on `timer`.
    pub fn new(mode: Mode, timer: R::Timer) -> Self {
        Self {
            shared: Arc::new(Shared {
                mode,
                timer,
                state: Mutex::new(State::new()),
            }),
            interval: Duration::ZERO,
        }
    }

    /// Shorthand for [`Mode::Debounce`].
    pub fn debouncer(timer: R::Timer) -> Self {
        Self::new(Mode::Debounce, timer)
    }

    /// Shorthand for [`Mode::Throttle`].
    pub fn throttler(timer: R::Timer) -> Self {
        Self::new(Mode::Throttle, timer)
    }

    /// Builds a limiter whose mode and [`submit`](Self::submit) interval come
    /// from `config`.
    ///
    /// # Errors
    /// Returns [`CadenceError::InvalidArgument`](cadence_error::CadenceError::InvalidArgument)
    /// if the configured interval is negative.
    pub fn from_config(config: &RateLimiterConfig, timer: R::Timer) -> Result<Self> {
        let interval = config.validate()?;
        Ok(Self::new(config.mode, timer).with_interval(interval))
    }

    /// Sets the interval used by [`submit`](Self::submit).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Mode fixed at construction.
    pub fn mode(&self) -> Mode {
        self.shared.mode
    }

    /// Interval used by [`submit`](Self::submit); zero unless configured.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Drops the pending action, if any, without disposing the limiter.
    ///
    /// Returns whether an action was pending.
    pub fn cancel(&self) -> bool {
        let mut state = self.shared.state.lock();
        let cancelled = state.disarm(&self.shared.timer);
        if cancelled.is_some() {
            state.stats.superseded += 1;
            trace!(mode = %self.shared.mode, "cancelled pending action");
        }
        drop(state);
        cancelled.is_some()
    }

    /// Runs the pending action now, on the calling thread, instead of waiting
    /// for its timer.
    ///
    /// Returns whether the action ran. In throttle mode this counts as an
    /// execution and starts a new window. An action whose runner has started
    /// shutting down is dropped instead, as it would be when its timer fires.
    pub fn flush(&self) -> bool {
        let mut state = self.shared.state.lock();
        let Some(pending) = state.disarm(&self.shared.timer) else {
            return false;
        };
        if pending.runner.is_shutting_down() {
            state.stats.skipped += 1;
            debug!(mode = %self.shared.mode, "flush dropped action of a shut down runner");
            drop(state);
            drop(pending);
            return false;
        }
        if self.shared.mode == Mode::Throttle {
            let now = self.shared.timer.now();
            state.record_fire(now);
        }
        state.stats.flushed += 1;
        drop(state);
        pending.run_inline();
        true
    }

    /// Cancels any pending action and rejects every later trigger.
    ///
    /// Idempotent.
    pub fn dispose(&self) {
        let mut state = self.shared.state.lock();
        if state.disposed {
            return;
        }
        state.disposed = true;
        let pending = state.disarm(&self.shared.timer);
        if pending.is_some() {
            state.stats.superseded += 1;
        }
        debug!(mode = %self.shared.mode, "disposed");
        drop(state);
        drop(pending);
    }

    /// Whether an action is waiting on a timer.
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().pending.is_some()
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.shared.state.lock().disposed
    }

    /// Snapshot of the counters since construction.
    pub fn stats(&self) -> RateLimiterStats {
        self.shared.state.lock().stats
    }
}

impl<P, R> RateLimiter<P, R>
where
    P: Send + 'static,
    R: Runtime,
{
    /// Reports a rate-limited event.
    ///
    /// In debounce mode the action is (re)scheduled to run `interval` after this
    /// call. In throttle mode it runs right away, on the calling thread, if at least
    /// `interval` has passed since the last execution; otherwise it is scheduled for
    /// the end of the current window. Any previously pending action is dropped.
    ///
    /// `runner` is the context a scheduled action runs on; `None` selects the
    /// calling thread's ambient runner. The call does nothing when the limiter
    /// is disposed, when there is no ambient runner, or when the runner is
    /// shutting down.
    pub fn trigger<F>(
        &self,
        interval: Duration,
        action: F,
        parameter: P,
        runner: Option<R::Runner>,
    ) -> TriggerOutcome
    where
        F: FnOnce(P) + Send + 'static,
    {
        let shared = &self.shared;
        let mut state = shared.state.lock();

        if state.disposed {
            return skip(&mut state, SkipReason::Disposed);
        }
        let Some(runner) = runner.or_else(R::Runner::current) else {
            return skip(&mut state, SkipReason::NoAmbientRunner);
        };
        if runner.is_shutting_down() {
            return skip(&mut state, SkipReason::ShuttingDown);
        }

        state.stats.triggers += 1;
        let superseded = state.disarm(&shared.timer);
        if superseded.is_some() {
            state.stats.superseded += 1;
        }

        let delay = match shared.mode {
            Mode::Debounce => interval,
            Mode::Throttle => {
                let now = shared.timer.now();
                match state.last_fire.map(|last| now - last) {
                    Some(elapsed) if elapsed < interval => interval - elapsed,
                    _ => {
                        state.record_fire(now);
                        state.stats.immediate += 1;
                        trace!(mode = %shared.mode, "running action immediately");
                        drop(state);
                        drop(superseded);
                        action(parameter);
                        return TriggerOutcome::Executed;
                    }
                }
            }
        };

        let generation = state.generation;
        let weak = Arc::downgrade(shared);
        let Some(handle) = shared
            .timer
            .schedule(delay, move || Shared::fire(&weak, generation))
        else {
            let outcome = skip(&mut state, SkipReason::ShuttingDown);
            drop(state);
            drop(superseded);
            return outcome;
        };
        state.pending = Some(Pending {
            handle,
            action: Box::new(action),
            parameter,
            runner,
        });
        trace!(
            mode = %shared.mode,
            generation,
            delay_ms = delay.as_millis() as u64,
            "armed timer"
        );
        drop(state);
        drop(superseded);
        TriggerOutcome::Scheduled
    }

    /// Same as [`trigger`](Self::trigger) with a signed millisecond interval.
    ///
    /// # Errors
    /// Returns [`CadenceError::InvalidArgument`](cadence_error::CadenceError::InvalidArgument)
    /// if `interval_ms` is negative; nothing is scheduled or run in that case.
    pub fn trigger_millis<F>(
        &self,
        interval_ms: i64,
        action: F,
        parameter: P,
        runner: Option<R::Runner>,
    ) -> Result<TriggerOutcome>
    where
        F: FnOnce(P) + Send + 'static,
    {
        let interval = interval_from_millis(interval_ms)?;
        Ok(self.trigger(interval, action, parameter, runner))
    }

    /// [`trigger`](Self::trigger) with the limiter's configured interval.
    pub fn submit<F>(&self, action: F, parameter: P, runner: Option<R::Runner>) -> TriggerOutcome
    where
        F: FnOnce(P) + Send + 'static,
    {
        self.trigger(self.interval, action, parameter, runner)
    }
}

impl<P, R> Shared<P, R>
where
    P: Send + 'static,
    R: Runtime,
{
    /// Timer callback. Acts only if its timer is still the armed one.
    fn fire(weak: &Weak<Self>, generation: u64) {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let mut state = shared.state.lock();

        if state.disposed || state.generation != generation {
            state.stats.stale_fires += 1;
            debug!(mode = %shared.mode, generation, "ignoring superseded timer");
            return;
        }
        let Some(pending) = state.pending.take() else {
            state.stats.stale_fires += 1;
            return;
        };
        state.generation = state.generation.wrapping_add(1);

        if pending.runner.is_shutting_down() {
            state.stats.skipped += 1;
            warn!(mode = %shared.mode, "runner shut down before the pending action could run");
            drop(state);
            drop(pending);
            return;
        }

        if shared.mode == Mode::Throttle {
            let now = shared.timer.now();
            state.record_fire(now);
        }
        state.stats.trailing += 1;
        trace!(mode = %shared.mode, generation, "timer fired");
        drop(state);
        pending.hand_to_runner();
    }
}

fn skip<P, R: Runtime>(state: &mut State<P, R>, reason: SkipReason) -> TriggerOutcome {
    state.stats.skipped += 1;
    debug!(?reason, "trigger skipped");
    TriggerOutcome::Skipped(reason)
}

impl<P, R: Runtime> Drop for RateLimiter<P, R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<P, R: Runtime> fmt::Debug for RateLimiter<P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("RateLimiter")
            .field("mode", &self.shared.mode)
            .field("interval", &self.interval)
            .field("pending", &state.pending.is_some())
            .field("disposed", &state.disposed)
            .field("stats", &state.stats)
            .finish()
    }
}
