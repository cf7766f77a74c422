// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cadence_error::{CadenceError, Result};
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::runner::{Job, Runner};
use crate::runtime::Runtime;
use crate::shutdown::ShutdownToken;
use crate::timer::TimerService;

pub struct TokioRuntime;

impl Runtime for TokioRuntime {
    type Timer = TokioTimer;
    type Runner = TokioRunner;
}

/// Timer service backed by tasks spawned on a tokio runtime.
///
/// Uses `tokio::time::Instant`, so a paused test clock drives it.
#[derive(Clone, Debug)]
pub struct TokioTimer {
    handle: Handle,
}

impl TokioTimer {
    /// Binds to the runtime the caller is running on.
    ///
    /// # Errors
    /// Returns [`CadenceError::NoRuntime`] when called outside a tokio runtime.
    pub fn current() -> Result<Self> {
        Handle::try_current().map(Self::from_handle).map_err(|_| {
            CadenceError::no_runtime("TokioTimer::current called outside a tokio runtime")
        })
    }

    pub fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }
}

#[derive(Debug)]
pub struct TokioTimerHandle {
    task: AbortHandle,
}

impl TimerService for TokioTimer {
    type Handle = TokioTimerHandle;
    type Instant = tokio::time::Instant;

    fn schedule<F>(&self, delay: Duration, callback: F) -> Option<Self::Handle>
    where
        F: FnOnce() + Send + 'static,
    {
        // Deadline is fixed now, not when the task is first polled.
        let deadline = tokio::time::Instant::now() + delay;
        let polled = Arc::new(AtomicBool::new(false));
        let task = self.handle.spawn({
            let polled = polled.clone();
            async move {
                polled.store(true, Ordering::Release);
                tokio::time::sleep_until(deadline).await;
                callback();
            }
        });
        // A runtime that is shutting down cancels new tasks before their first poll.
        if task.is_finished() && !polled.load(Ordering::Acquire) {
            return None;
        }
        Some(TokioTimerHandle {
            task: task.abort_handle(),
        })
    }

    fn cancel(&self, handle: &Self::Handle) {
        handle.task.abort();
    }

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }
}

thread_local! {
    static AMBIENT: RefCell<Option<TokioRunner>> = const { RefCell::new(None) };
}

/// Runs jobs as tasks on a tokio runtime.
///
/// Shutdown is signalled through a [`ShutdownToken`]; once it is set the runner
/// reports itself as shutting down even though the runtime may still accept tasks.
#[derive(Clone, Debug)]
pub struct TokioRunner {
    handle: Handle,
    shutdown: ShutdownToken,
}

impl TokioRunner {
    pub fn new(handle: Handle) -> Self {
        Self::with_shutdown(handle, ShutdownToken::new())
    }

    pub fn with_shutdown(handle: Handle, shutdown: ShutdownToken) -> Self {
        Self { handle, shutdown }
    }

    pub fn shutdown_token(&self) -> ShutdownToken {
        self.shutdown.clone()
    }

    /// Starts shutting this context down.
    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    /// Installs this runner as the calling thread's ambient context until the
    /// returned guard is dropped.
    pub fn enter(&self) -> AmbientGuard {
        let previous = AMBIENT.with(|slot| slot.borrow_mut().replace(self.clone()));
        AmbientGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Runner for TokioRunner {
    /// Spawns `job` as a detached task. A runtime that has shut down drops it.
    fn run(&self, job: Job) {
        // Detached: a panicking job ends its own task only.
        drop(self.handle.spawn(async move { job() }));
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown.is_shutting_down()
    }

    /// The runner installed with [`TokioRunner::enter`], or else a runner on the
    /// tokio runtime the thread is inside.
    ///
    /// The fallback runner has a fresh [`ShutdownToken`], so it never reports
    /// shutting down by itself. A runtime that is tearing down is noticed instead
    /// when [`TokioTimer`] refuses to arm a timer on it.
    fn current() -> Option<Self> {
        AMBIENT
            .with(|slot| slot.borrow().clone())
            .or_else(|| Handle::try_current().ok().map(Self::new))
    }
}

/// Restores the previous ambient runner when dropped.
#[must_use = "the ambient runner is uninstalled when the guard is dropped"]
#[derive(Debug)]
pub struct AmbientGuard {
    previous: Option<TokioRunner>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for AmbientGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        AMBIENT.with(|slot| *slot.borrow_mut() = previous);
    }
}
