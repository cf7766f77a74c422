// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::runner::{Job, Runner};

/// Runs every job synchronously on the thread that hands it over.
///
/// For trailing executions that is the timer service's thread. The inline runner
/// never shuts down and is always available as the ambient context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InlineRunner;

impl Runner for InlineRunner {
    fn run(&self, job: Job) {
        job();
    }

    fn is_shutting_down(&self) -> bool {
        false
    }

    fn current() -> Option<Self> {
        Some(InlineRunner)
    }
}
