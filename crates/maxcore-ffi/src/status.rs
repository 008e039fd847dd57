//! C-compatible status codes.
//!
//! [`MaxcoreStatus`] is returned by every status-reporting entry point.
//! Transition outcomes use [`MaxcoreEvent`](crate::MaxcoreEvent) instead;
//! their error detail goes through `maxcore_last_error`.

use maxcore_core::{ConfigError, ProjectionError};

/// Status code returned by the C ABI.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaxcoreStatus {
    /// Success.
    Ok = 0,
    /// Handle is zero, stale, or was never issued.
    InvalidHandle = -1,
    /// A required pointer is null.
    InvalidArgument = -2,
    /// Engine construction rejected the configuration.
    ConfigError = -3,
    /// The derived projection produced no frame.
    ProjectionFailed = -4,
    /// The handle registry is full.
    OutOfHandles = -5,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -6,
    /// A Rust panic was caught at the ABI boundary.
    Panicked = -128,
}

impl From<&ConfigError> for MaxcoreStatus {
    fn from(_e: &ConfigError) -> Self {
        MaxcoreStatus::ConfigError
    }
}

impl From<&ProjectionError> for MaxcoreStatus {
    fn from(_e: &ProjectionError) -> Self {
        MaxcoreStatus::ProjectionFailed
    }
}
