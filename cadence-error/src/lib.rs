// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the cadence rate limiting library
//!
//! Only argument validation and service construction can fail. Calls that are
//! skipped because the limiter was disposed or its runner is shutting down are
//! not errors; they are reported as trigger outcomes by the `cadence` crate.
//!
//! # Examples
//!
//! ```
//! use cadence_error::{CadenceError, Result};
//!
//! fn interval_from_settings(millis: i64) -> Result<u64> {
//!     u64::try_from(millis)
//!         .map_err(|_| CadenceError::invalid_argument(format!("negative interval: {millis}ms")))
//! }
//!
//! assert!(interval_from_settings(-1).is_err());
//! ```

/// Root error type for all cadence operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CadenceError {
    /// An argument was rejected at call time
    ///
    /// Raised for negative intervals supplied through signed millisecond
    /// entry points and configuration.
    #[error("Invalid argument: {context}")]
    InvalidArgument {
        /// What was wrong with the argument
        context: String,
    },

    /// A runtime-backed service was requested outside of its runtime
    #[error("No runtime available: {context}")]
    NoRuntime {
        /// Which service needed the runtime
        context: String,
    },
}

impl CadenceError {
    /// Create an invalid argument error with the given context
    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context: context.into(),
        }
    }

    /// Create a missing runtime error with the given context
    pub fn no_runtime(context: impl Into<String>) -> Self {
        Self::NoRuntime {
            context: context.into(),
        }
    }

    /// Whether the caller can fix this error by changing its arguments
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Specialized Result type for cadence operations
///
/// ```
/// use cadence_error::Result;
///
/// fn ready() -> Result<bool> {
///     Ok(true)
/// }
/// ```
pub type Result<T> = std::result::Result<T, CadenceError>;
