// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Single-shot timer scheduling with cancellation.
pub trait TimerService: Clone + Send + Sync + Debug + 'static {
    /// Handle to one scheduled callback.
    type Handle: Debug + Send + 'static;

    type Instant: Copy
        + Debug
        + Ord
        + Send
        + Sync
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;

    /// Runs `callback` once after `delay`, possibly on another thread.
    ///
    /// Returns `None`, dropping `callback`, when the service can no longer run
    /// callbacks, e.g. because its runtime is shutting down.
    fn schedule<F>(&self, delay: Duration, callback: F) -> Option<Self::Handle>
    where
        F: FnOnce() + Send + 'static;

    /// Prevents a scheduled callback from starting.
    ///
    /// Must be idempotent and safe to call on a handle that already fired or was
    /// already cancelled. A callback that has already started is not interrupted.
    fn cancel(&self, handle: &Self::Handle);

    /// Returns the current instant on this service's clock.
    fn now(&self) -> Self::Instant;
}
