// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::mode::Mode;
use cadence_error::{CadenceError, Result};
use std::time::Duration;

/// Settings for one rate-limited event source.
///
/// The interval is signed so settings coming from hosts that only know
/// signed milliseconds can be rejected with a proper error instead of wrapping.
///
/// ```
/// use cadence::{Mode, RateLimiterConfig};
/// use std::time::Duration;
///
/// let config = RateLimiterConfig::throttle(250);
/// assert_eq!(config.mode, Mode::Throttle);
/// assert_eq!(config.validate().unwrap(), Duration::from_millis(250));
/// assert!(RateLimiterConfig::debounce(-1).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateLimiterConfig {
    pub mode: Mode,
    pub interval_ms: i64,
}

impl RateLimiterConfig {
    pub fn debounce(interval_ms: i64) -> Self {
        Self {
            mode: Mode::Debounce,
            interval_ms,
        }
    }

    pub fn throttle(interval_ms: i64) -> Self {
        Self {
            mode: Mode::Throttle,
            interval_ms,
        }
    }

    /// Returns the configured interval.
    ///
    /// # Errors
    /// Returns [`CadenceError::InvalidArgument`] if `interval_ms` is negative.
    pub fn validate(&self) -> Result<Duration> {
        interval_from_millis(self.interval_ms)
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::debounce(0)
    }
}

/// Converts a signed millisecond interval to a [`Duration`].
///
/// # Errors
/// Returns [`CadenceError::InvalidArgument`] if `interval_ms` is negative.
pub fn interval_from_millis(interval_ms: i64) -> Result<Duration> {
    u64::try_from(interval_ms)
        .map(Duration::from_millis)
        .map_err(|_| {
            CadenceError::invalid_argument(format!(
                "interval must not be negative, got {interval_ms}ms"
            ))
        })
}
