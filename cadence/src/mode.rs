// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;

/// How a [`RateLimiter`](crate::RateLimiter) reacts to a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Run once, `interval` after the last trigger of a burst.
    Debounce,
    /// Run immediately after a quiet period, then at most once per `interval`,
    /// collapsing the triggers in between into one trailing run.
    Throttle,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Debounce => f.write_str("debounce"),
            Mode::Throttle => f.write_str("throttle"),
        }
    }
}
