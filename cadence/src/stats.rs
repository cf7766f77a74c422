// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Counters describing what a [`RateLimiter`](crate::RateLimiter) has done so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimiterStats {
    /// Trigger calls that got past the disposed and runner checks.
    pub triggers: u64,
    /// Actions run synchronously inside a throttle trigger.
    pub immediate: u64,
    /// Actions handed to a runner when their timer fired.
    pub trailing: u64,
    /// Actions run early through `flush`.
    pub flushed: u64,
    /// Pending actions dropped because a later trigger, `cancel` or disposal replaced them.
    pub superseded: u64,
    /// Trigger, flush and timer-fire calls that did nothing: disposed limiter,
    /// shutting-down runner or runtime, or no ambient runner.
    pub skipped: u64,
    /// Timer callbacks that arrived after their timer had been replaced or cancelled.
    pub stale_fires: u64,
}

impl RateLimiterStats {
    /// Total number of actions that ran or were handed to a runner.
    pub fn executions(&self) -> u64 {
        self.immediate + self.trailing + self.flushed
    }
}
