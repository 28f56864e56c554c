//! Strongly-typed identifiers.
//!
//! Newtype wrappers prevent accidental mixing of frame sequence numbers
//! with plain loop counters or vertex indices.

use serde::{Deserialize, Serialize};

/// Monotone sequence number assigned to each frame update.
///
/// Sequence numbers start at 1; 0 is reserved as the "nothing applied yet"
/// watermark on the publish path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameSeq(pub u64);

impl FrameSeq {
    /// Returns the raw sequence number.
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the sequence number of the following frame.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for FrameSeq {
    fn from(val: u64) -> Self {
        Self(val)
    }
}

impl std::fmt::Display for FrameSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
