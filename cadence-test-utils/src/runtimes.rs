// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::manual_timer::ManualTimer;
use crate::queue_runner::QueueRunner;
use cadence_runtime::{InlineRunner, Runtime};

/// Virtual clock, actions run on the advancing thread.
pub struct ManualRuntime;

impl Runtime for ManualRuntime {
    type Timer = ManualTimer;
    type Runner = InlineRunner;
}

/// Virtual clock, actions queue on a [`QueueRunner`] until drained.
pub struct QueuedRuntime;

impl Runtime for QueuedRuntime {
    type Timer = ManualTimer;
    type Runner = QueueRunner;
}
