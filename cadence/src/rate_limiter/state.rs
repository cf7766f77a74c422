// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::stats::RateLimiterStats;
use cadence_runtime::{Runtime, TimerService};

pub(crate) type Action<P> = Box<dyn FnOnce(P) + Send + 'static>;
pub(crate) type Instant<R> = <<R as Runtime>::Timer as TimerService>::Instant;
type Handle<R> = <<R as Runtime>::Timer as TimerService>::Handle;

/// The armed timer together with the latest submission it will run.
pub(crate) struct Pending<P, R: Runtime> {
    pub(crate) handle: Handle<R>,
    pub(crate) action: Action<P>,
    pub(crate) parameter: P,
    pub(crate) runner: R::Runner,
}

impl<P, R: Runtime> Pending<P, R> {
    pub(crate) fn run_inline(self) {
        (self.action)(self.parameter);
    }

    pub(crate) fn hand_to_runner(self)
    where
        P: Send + 'static,
    {
        let Pending {
            action,
            parameter,
            runner,
            ..
        } = self;
        cadence_runtime::Runner::run(&runner, Box::new(move || action(parameter)));
    }
}

pub(crate) struct State<P, R: Runtime> {
    pub(crate) pending: Option<Pending<P, R>>,
    /// `None` stands for "far in the past": the next throttle trigger runs immediately.
    pub(crate) last_fire: Option<Instant<R>>,
    /// Bumped whenever the pending slot changes; a fired timer whose generation
    /// no longer matches has been superseded.
    pub(crate) generation: u64,
    pub(crate) disposed: bool,
    pub(crate) stats: RateLimiterStats,
}

impl<P, R: Runtime> State<P, R> {
    pub(crate) fn new() -> Self {
        Self {
            pending: None,
            last_fire: None,
            generation: 0,
            disposed: false,
            stats: RateLimiterStats::default(),
        }
    }

    /// Empties the pending slot, cancelling its timer.
    ///
    /// The returned submission must be dropped or run after the lock is released.
    pub(crate) fn disarm(&mut self, timer: &R::Timer) -> Option<Pending<P, R>> {
        self.generation = self.generation.wrapping_add(1);
        let pending = self.pending.take()?;
        timer.cancel(&pending.handle);
        Some(pending)
    }

    /// Records an execution instant, never moving backwards.
    pub(crate) fn record_fire(&mut self, now: Instant<R>) {
        self.last_fire = Some(match self.last_fire {
            Some(last) if last > now => last,
            _ => now,
        });
    }
}
