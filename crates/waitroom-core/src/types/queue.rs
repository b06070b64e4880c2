//! Queue state types: positions, counters, and snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// A visitor's fixed place in the queue. Assigned once, never changed.
pub type Position = u64;

/// The two shared counters that define queue state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    /// Total visitors ever enqueued.
    Length,
    /// Total visitors admitted so far.
    Cursor,
}

impl Counter {
    /// Short name used to build the store key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Cursor => "cursor",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Both counters read together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Value of `queue:length`.
    pub length: u64,
    /// Value of `queue:cursor`.
    pub cursor: u64,
}

impl QueueSnapshot {
    /// Build a snapshot, rejecting a cursor that has passed the length.
    ///
    /// A cursor ahead of the length means positions were admitted that were
    /// never issued. This is reported, never clamped.
    pub fn checked(length: u64, cursor: u64) -> AppResult<Self> {
        if cursor > length {
            tracing::error!(length, cursor, "Queue cursor exceeds queue length");
            return Err(AppError::integrity(format!(
                "queue cursor {cursor} exceeds queue length {length}"
            )));
        }
        Ok(Self { length, cursor })
    }

    /// Number of issued positions not yet admitted.
    pub fn waiting(&self) -> u64 {
        self.length.saturating_sub(self.cursor)
    }
}
