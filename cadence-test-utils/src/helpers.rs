// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::manual_timer::ManualTimer;
use crate::recorder::Recorder;
use core::fmt::Debug;
use std::time::Duration;

/// Advances `timer` to `at_ms` virtual milliseconds since its creation.
pub fn advance_to_millis(timer: &ManualTimer, at_ms: u64) {
    timer.advance_to(crate::ManualInstant::from_millis(at_ms));
}

/// Advances `timer` by `ms` virtual milliseconds.
pub fn advance_millis(timer: &ManualTimer, ms: u64) {
    timer.advance(Duration::from_millis(ms));
}

pub fn assert_executions<P>(recorder: &Recorder<P>, expected: &[(u64, P)])
where
    P: Clone + Debug + PartialEq + Send + 'static,
{
    assert_eq!(recorder.executions(), expected);
}

pub fn assert_nothing_executed<P>(recorder: &Recorder<P>)
where
    P: Clone + Debug + Send + 'static,
{
    let executions = recorder.executions();
    assert!(
        executions.is_empty(),
        "Unexpected execution, expected no output: {executions:?}"
    );
}
