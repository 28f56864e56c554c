//! Frame lifecycle event types.
//!
//! Lightweight value types emitted around each frame update. They carry
//! just enough data to characterize upload cost and trace publish
//! ordering without holding onto mesh data.

use serde::{Deserialize, Serialize};

use pulsar_types::FrameSeq;

/// An event emitted during a frame update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Frame the event belongs to.
    pub frame: FrameSeq,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame update started.
    FrameBegin {
        /// Simulation time driving this frame (seconds).
        sim_time: f64,
    },

    /// Frame update returned.
    FrameEnd {
        /// Wall-clock time spent in the update call (seconds).
        wall_time: f64,
    },

    /// A mesh artifact was built from the buffers.
    ArtifactBuilt {
        /// Vertices in the artifact.
        vertex_count: usize,
        /// Index entries in the artifact.
        index_count: usize,
    },

    /// A publish replaced the consumer's mesh.
    PublishApplied {
        /// Frame that produced the applied artifact.
        seq: FrameSeq,
        /// Whether the publish completed on a deferred task.
        deferred: bool,
    },

    /// A stale publish was dropped instead of applied.
    PublishSkipped {
        /// Frame that produced the dropped artifact.
        seq: FrameSeq,
        /// Newest sequence applied so far.
        newest: FrameSeq,
    },

    /// A publish failed.
    PublishFailed {
        /// Frame whose publish failed.
        seq: FrameSeq,
        /// Error description.
        reason: String,
    },
}

impl FrameEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: FrameSeq, kind: EventKind) -> Self {
        Self { frame, kind }
    }
}
