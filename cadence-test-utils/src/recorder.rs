// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::manual_timer::ManualTimer;
use cadence_runtime::TimerService;
use parking_lot::Mutex;
use std::sync::Arc;

/// Captures executions of rate-limited actions together with the virtual
/// time (in milliseconds) they ran at.
#[derive(Clone, Debug)]
pub struct Recorder<P> {
    timer: ManualTimer,
    executions: Arc<Mutex<Vec<(u64, P)>>>,
}

impl<P> Recorder<P>
where
    P: Clone + Send + 'static,
{
    pub fn new(timer: ManualTimer) -> Self {
        Self {
            timer,
            executions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// An action that records its payload when run.
    pub fn action(&self) -> impl FnOnce(P) + Send + 'static {
        let timer = self.timer.clone();
        let executions = self.executions.clone();
        move |payload| executions.lock().push((timer.now().as_millis(), payload))
    }

    pub fn executions(&self) -> Vec<(u64, P)> {
        self.executions.lock().clone()
    }

    pub fn payloads(&self) -> Vec<P> {
        self.executions
            .lock()
            .iter()
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.executions.lock().len()
    }
}
