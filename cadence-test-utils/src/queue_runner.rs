// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_runtime::{Job, Runner, ShutdownToken};
use core::fmt;
use parking_lot::Mutex;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::Arc;

thread_local! {
    static AMBIENT: RefCell<Option<QueueRunner>> = const { RefCell::new(None) };
}

/// Runner modelling an event loop: jobs wait in a queue until the test drains it.
#[derive(Clone, Default)]
pub struct QueueRunner {
    queue: Arc<Mutex<VecDeque<Job>>>,
    shutdown: ShutdownToken,
}

impl QueueRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs queued jobs on the calling thread, including jobs queued while
    /// draining. Returns how many ran.
    pub fn drain(&self) -> usize {
        let mut ran = 0;
        loop {
            let job = self.queue.lock().pop_front();
            match job {
                Some(job) => {
                    job();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    pub fn queued(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    /// Installs this runner as the calling thread's ambient context.
    pub fn enter(&self) -> QueueRunnerGuard {
        let previous = AMBIENT.with(|slot| slot.borrow_mut().replace(self.clone()));
        QueueRunnerGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl fmt::Debug for QueueRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueRunner")
            .field("queued", &self.queued())
            .field("shutting_down", &self.shutdown.is_shutting_down())
            .finish()
    }
}

impl Runner for QueueRunner {
    fn run(&self, job: Job) {
        self.queue.lock().push_back(job);
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown.is_shutting_down()
    }

    fn current() -> Option<Self> {
        AMBIENT.with(|slot| slot.borrow().clone())
    }
}

/// Restores the previous ambient [`QueueRunner`] when dropped.
#[must_use = "the ambient runner is uninstalled when the guard is dropped"]
pub struct QueueRunnerGuard {
    previous: Option<QueueRunner>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for QueueRunnerGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        AMBIENT.with(|slot| *slot.borrow_mut() = previous);
    }
}
