//! DST transition policies for converting local wall-clock times.
//!
//! Ambiguous times (the repeated hour at fall-back) always resolve to the
//! earlier instant. The policy only decides what happens to times inside the
//! spring-forward gap, which never occur on the wall clock.

use serde::{Deserialize, Serialize};

/// Policy for local times that fall in a DST gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DstPolicy {
    /// Fail with `InvalidArgument` (e.g., 02:30 on a US spring-forward date).
    #[default]
    Reject,
    /// Move the time forward by the length of the gap, so 02:30 becomes 03:30.
    ShiftForward,
}
