// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// What a single trigger call did.
#[must_use = "the outcome reports whether the action ran, was scheduled, or was dropped"]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerOutcome {
    /// The action ran synchronously before the call returned (throttle only).
    Executed,
    /// The action is pending on a timer and may still be superseded.
    Scheduled,
    /// Nothing happened; the action was dropped without running.
    Skipped(SkipReason),
}

impl TriggerOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, TriggerOutcome::Skipped(_))
    }
}

/// Why a trigger call was a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The limiter has been disposed.
    Disposed,
    /// The runner has started shutting down.
    ShuttingDown,
    /// No runner was supplied and the calling thread has no ambient one.
    NoAmbientRunner,
}
