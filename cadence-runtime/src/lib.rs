// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Capability traits for the two collaborators a rate limiter depends on.
//!
//! - [`TimerService`](timer::TimerService) schedules a single-shot callback after a
//!   delay and can cancel it.
//! - [`Runner`](runner::Runner) is the execution context the final action runs on.
//!
//! A [`Runtime`](runtime::Runtime) pairs one of each. The `runtime-tokio` feature
//! (default) provides [`TokioRuntime`](impls::tokio::TokioRuntime); the
//! [`InlineRunner`](impls::inline::InlineRunner) is always available.

pub mod impls;
pub mod runner;
pub mod runtime;
pub mod shutdown;
pub mod timer;

pub use impls::inline::InlineRunner;
#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::{AmbientGuard, TokioRunner, TokioRuntime, TokioTimer, TokioTimerHandle};
pub use runner::{Job, Runner};
pub use runtime::Runtime;
pub use shutdown::ShutdownToken;
pub use timer::TimerService;
