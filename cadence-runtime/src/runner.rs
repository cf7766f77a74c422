// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;

/// Unit of work handed to a [`Runner`].
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Execution context in which a rate-limited action finally runs.
///
/// A runner may be a specific thread, an event-loop tick, or a plain synchronous
/// call. Panics raised by a job are not caught by the rate limiter; they surface
/// wherever the runner executes the job.
pub trait Runner: Clone + Send + Sync + Debug + 'static {
    /// Executes `job` under this context.
    fn run(&self, job: Job);

    /// Returns `true` once the context has started shutting down and can no
    /// longer be relied on to execute jobs.
    fn is_shutting_down(&self) -> bool;

    /// Returns the ambient context of the calling thread, if there is one.
    fn current() -> Option<Self>;
}
