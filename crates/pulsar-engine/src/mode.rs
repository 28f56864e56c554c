//! The update-mode state machine.
//!
//! The original app toggled a global static from a tap gesture; here the
//! mode is explicit state on the updater, advanced only through
//! caller-driven transitions. The updater itself never changes mode.

use serde::{Deserialize, Serialize};

/// How a frame's regenerated geometry reaches (or doesn't reach) the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateMode {
    /// Recompute vertex data into the internal buffers; no artifact.
    VertexDataOnly,
    /// Recompute and build an artifact, retained internally, not published.
    GenerateOnly,
    /// Recompute, build, and synchronously replace the consumer's mesh.
    GenerateAndPublish,
    /// Recompute, then build and publish as a deferred task whose
    /// completion is unordered relative to later frames.
    GenerateAndPublishDeferred,
}

impl UpdateMode {
    /// The next mode in the characterization cycle. Four advances return
    /// to the starting mode.
    pub fn advance(self) -> Self {
        match self {
            Self::VertexDataOnly => Self::GenerateOnly,
            Self::GenerateOnly => Self::GenerateAndPublish,
            Self::GenerateAndPublish => Self::GenerateAndPublishDeferred,
            Self::GenerateAndPublishDeferred => Self::VertexDataOnly,
        }
    }

    /// All modes, in cycle order.
    pub fn all() -> [Self; 4] {
        [
            Self::VertexDataOnly,
            Self::GenerateOnly,
            Self::GenerateAndPublish,
            Self::GenerateAndPublishDeferred,
        ]
    }

    /// Returns the mode name used in configs, CLI flags, and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Self::VertexDataOnly => "vertex_data_only",
            Self::GenerateOnly => "generate_only",
            Self::GenerateAndPublish => "generate_and_publish",
            Self::GenerateAndPublishDeferred => "generate_and_publish_deferred",
        }
    }

    /// Parses a mode name as written in configs and CLI flags.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "vertex_data_only" | "vertex" => Some(Self::VertexDataOnly),
            "generate_only" | "generate" => Some(Self::GenerateOnly),
            "generate_and_publish" | "publish" => Some(Self::GenerateAndPublish),
            "generate_and_publish_deferred" | "deferred" => {
                Some(Self::GenerateAndPublishDeferred)
            }
            _ => None,
        }
    }
}
