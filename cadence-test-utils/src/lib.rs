// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the cadence workspace.
//!
//! Rate limiting is all about time, so the central piece here is a
//! [`ManualTimer`]: a timer service on a virtual clock that only moves when a
//! test calls [`ManualTimer::advance`]. Scheduled callbacks fire in deadline
//! order on the advancing thread, which makes every timing assertion exact.
//!
//! # Key Types
//!
//! - [`ManualTimer`] / [`ManualInstant`] - deterministic timer service
//! - [`QueueRunner`] - event-loop style runner that queues jobs until drained
//! - [`Recorder`] - captures action executions with the instant they ran at
//! - [`ManualRuntime`] / [`QueuedRuntime`] - runtimes pairing the manual timer
//!   with an inline or a queueing runner
//!
//! ```rust
//! use cadence_test_utils::{ManualTimer, Recorder};
//! use cadence_runtime::TimerService;
//! use std::time::Duration;
//!
//! let timer = ManualTimer::new();
//! let recorder = Recorder::new(timer.clone());
//! let record = recorder.action();
//! let _handle = timer.schedule(Duration::from_millis(100), move || record("fired"));
//!
//! timer.advance(Duration::from_millis(100));
//! assert_eq!(recorder.executions(), vec![(100, "fired")]);
//! ```

pub mod helpers;
pub mod manual_timer;
pub mod queue_runner;
pub mod recorder;
pub mod runtimes;
pub mod test_data;

pub use manual_timer::{ManualInstant, ManualTimer, ManualTimerHandle};
pub use queue_runner::{QueueRunner, QueueRunnerGuard};
pub use recorder::Recorder;
pub use runtimes::{ManualRuntime, QueuedRuntime};
