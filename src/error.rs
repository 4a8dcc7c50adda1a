use crate::Timestamp;

use thiserror::Error;

/// Errors raised while configuring the indicator or feeding bar series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown timeframe '{0}'")]
    UnknownTimeframe(String),

    #[error("open_time must be non-decreasing: last={last}, got={got}")]
    NonMonotonicTime { last: Timestamp, got: Timestamp },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a host [`Notifier`](crate::Notifier).
///
/// Dispatch logs it and moves on; notifications are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);
