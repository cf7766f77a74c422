// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debounce and throttle for high-frequency trigger streams.
//!
//! A [`RateLimiter`] sits between an event source that fires too often (key
//! presses, sensor readings, file-change notifications) and an action that should
//! not run that often. It owns one pending-timer slot and decides, per trigger,
//! whether to run the action now, schedule it, or reschedule it.
//!
//! # Modes
//!
//! - **[`Mode::Debounce`]** - run once, `interval` after the last trigger of a burst.
//! - **[`Mode::Throttle`]** - run immediately after a quiet period, then at most
//!   once per `interval`; triggers in between collapse into one trailing run with
//!   the latest parameter.
//!
//! # Collaborators
//!
//! Time and execution are injected through a [`Runtime`](cadence_runtime::Runtime):
//! its [`TimerService`](cadence_runtime::TimerService) schedules single-shot
//! callbacks, and its [`Runner`](cadence_runtime::Runner) is the context in which
//! scheduled actions finally run.
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - [`TokioRateLimiter`] over `TokioTimer` and `TokioRunner`
//! - `tracing` - emit trigger decisions through `tracing`
//! - `serde` (default) - deserializable [`RateLimiterConfig`] and [`Mode`]
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "runtime-tokio")]
//! # async fn example() -> cadence::Result<()> {
//! use cadence::{TokioRateLimiter, TriggerOutcome};
//! use cadence_runtime::TokioTimer;
//! use std::time::Duration;
//!
//! let save = TokioRateLimiter::<String>::throttler(TokioTimer::current()?);
//! let interval = Duration::from_millis(500);
//!
//! // First call runs right away, the next one is deferred to the window boundary.
//! let first = save.trigger(interval, |doc| println!("saving {doc}"), "v1".into(), None);
//! let second = save.trigger(interval, |doc| println!("saving {doc}"), "v2".into(), None);
//! assert_eq!(first, TriggerOutcome::Executed);
//! assert_eq!(second, TriggerOutcome::Scheduled);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod logging;

mod config;
mod mode;
mod outcome;
mod rate_limiter;
mod stats;

pub use cadence_error::{CadenceError, Result};
pub use config::{interval_from_millis, RateLimiterConfig};
pub use mode::Mode;
pub use outcome::{SkipReason, TriggerOutcome};
pub use rate_limiter::RateLimiter;
pub use stats::RateLimiterStats;

#[cfg(feature = "runtime-tokio")]
pub use cadence_runtime::TokioRuntime;

/// Rate limiter driven by a tokio runtime.
#[cfg(feature = "runtime-tokio")]
pub type TokioRateLimiter<P> = RateLimiter<P, TokioRuntime>;
