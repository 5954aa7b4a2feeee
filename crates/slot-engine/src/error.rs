//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// Malformed date or time, non-positive slot interval, bad range, or a
    /// local time skipped by a DST transition under [`DstPolicy::Reject`].
    ///
    /// [`DstPolicy::Reject`]: crate::dst::DstPolicy::Reject
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimeZone(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
