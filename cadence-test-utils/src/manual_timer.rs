// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_runtime::TimerService;
use core::fmt;
use core::ops::{Add, Sub};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Point on a [`ManualTimer`]'s virtual clock, measured from its creation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManualInstant(Duration);

impl ManualInstant {
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn since_start(self) -> Duration {
        self.0
    }

    pub fn as_millis(self) -> u64 {
        self.0.as_millis() as u64
    }
}

impl Add<Duration> for ManualInstant {
    type Output = ManualInstant;

    fn add(self, duration: Duration) -> Self::Output {
        ManualInstant(self.0 + duration)
    }
}

impl Sub<ManualInstant> for ManualInstant {
    type Output = Duration;

    fn sub(self, other: ManualInstant) -> Self::Output {
        self.0.saturating_sub(other.0)
    }
}

/// Handle to a callback scheduled on a [`ManualTimer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ManualTimerHandle {
    due: ManualInstant,
    id: u64,
}

impl ManualTimerHandle {
    pub fn due(&self) -> ManualInstant {
        self.due
    }
}

#[derive(Default)]
struct Clock {
    now: ManualInstant,
    next_id: u64,
    scheduled: BTreeMap<(ManualInstant, u64), Callback>,
}

/// Timer service driven by an explicit virtual clock.
///
/// Clones share the same clock and queue. Callbacks run on the thread calling
/// [`advance`](Self::advance), with the internal lock released, so they may
/// schedule or cancel further callbacks.
#[derive(Clone, Default)]
pub struct ManualTimer {
    clock: Arc<Mutex<Clock>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `duration`, firing every callback that falls
    /// due on the way, in deadline order. Returns how many callbacks fired.
    pub fn advance(&self, duration: Duration) -> usize {
        let target = self.clock.lock().now + duration;
        self.advance_to(target)
    }

    /// Moves the clock forward to `target`. Does nothing if `target` is in the past.
    pub fn advance_to(&self, target: ManualInstant) -> usize {
        let mut fired = 0;
        loop {
            let callback = {
                let mut clock = self.clock.lock();
                let next_is_due = clock
                    .scheduled
                    .first_key_value()
                    .is_some_and(|((due, _), _)| *due <= target);
                if !next_is_due {
                    if clock.now < target {
                        clock.now = target;
                    }
                    return fired;
                }
                match clock.scheduled.pop_first() {
                    Some(((due, _), callback)) => {
                        if clock.now < due {
                            clock.now = due;
                        }
                        callback
                    }
                    None => return fired,
                }
            };
            callback();
            fired += 1;
        }
    }

    /// Number of callbacks scheduled and not yet fired or cancelled.
    pub fn pending_count(&self) -> usize {
        self.clock.lock().scheduled.len()
    }

    /// Deadline of the earliest scheduled callback.
    pub fn next_due(&self) -> Option<ManualInstant> {
        self.clock
            .lock()
            .scheduled
            .first_key_value()
            .map(|((due, _), _)| *due)
    }
}

impl fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.clock.lock();
        f.debug_struct("ManualTimer")
            .field("now", &clock.now)
            .field("pending", &clock.scheduled.len())
            .finish()
    }
}

impl TimerService for ManualTimer {
    type Handle = ManualTimerHandle;
    type Instant = ManualInstant;

    fn schedule<F>(&self, delay: Duration, callback: F) -> Option<Self::Handle>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut clock = self.clock.lock();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.scheduled.insert((due, id), Box::new(callback));
        Some(ManualTimerHandle { due, id })
    }

    fn cancel(&self, handle: &Self::Handle) {
        self.clock.lock().scheduled.remove(&(handle.due, handle.id));
    }

    fn now(&self) -> Self::Instant {
        self.clock.lock().now
    }
}
