// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shutdown signalling for execution contexts.

use event_listener::Event;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag marking that an execution context has begun shutting down.
///
/// Clones observe the same state. Once set, the flag never clears.
///
/// # Example
///
/// ```
/// use cadence_runtime::ShutdownToken;
///
/// let token = ShutdownToken::new();
/// let observer = token.clone();
/// assert!(!observer.is_shutting_down());
///
/// token.shutdown();
/// assert!(observer.is_shutting_down());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ShutdownToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    started: AtomicBool,
    event: Event,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            started: AtomicBool::new(false),
            event: Event::new(),
        }
    }
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks shutdown as started and wakes every waiter. Idempotent.
    pub fn shutdown(&self) {
        self.inner.started.store(true, Ordering::Release);
        self.inner.event.notify(usize::MAX);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.inner.started.load(Ordering::Acquire)
    }

    /// Resolves once [`shutdown`](Self::shutdown) has been called on any clone.
    pub async fn shutdown_requested(&self) {
        loop {
            if self.is_shutting_down() {
                return;
            }
            let listener = self.inner.event.listen();
            // Re-check after registering so a concurrent shutdown is not missed.
            if self.is_shutting_down() {
                return;
            }
            listener.await;
        }
    }
}
