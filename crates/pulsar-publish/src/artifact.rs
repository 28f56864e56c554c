//! Immutable renderable mesh artifacts.
//!
//! An artifact is the unit handed to a consumer's replace-mesh operation.
//! It is built from the generator's live buffers through validation, and
//! once built it never changes — clones share the same backing snapshot.

use std::sync::Arc;

use pulsar_mesh::MeshBuffers;
use pulsar_types::{FrameSeq, PulsarError, PulsarResult};

/// An immutable mesh snapshot tagged with the frame that produced it.
#[derive(Debug, Clone)]
pub struct MeshArtifact {
    seq: FrameSeq,
    buffers: Arc<MeshBuffers>,
}

impl MeshArtifact {
    /// Builds an artifact from mesh buffers.
    ///
    /// The buffers are validated first; malformed buffers (inconsistent
    /// channel lengths, out-of-range indices) yield
    /// [`PulsarError::InvalidArtifact`]. Well-formed generator buffers
    /// never hit this path — it exists so a programming error surfaces as
    /// a reportable error instead of a process abort.
    pub fn build(buffers: &MeshBuffers, seq: FrameSeq) -> PulsarResult<Self> {
        buffers
            .validate()
            .map_err(|e| PulsarError::InvalidArtifact(e.to_string()))?;
        Ok(Self {
            seq,
            buffers: Arc::new(buffers.clone()),
        })
    }

    /// The frame sequence number this artifact was built for.
    #[inline]
    pub fn seq(&self) -> FrameSeq {
        self.seq
    }

    /// The snapshot's buffer contents.
    #[inline]
    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    /// Returns the number of vertices in the snapshot.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    /// Returns the number of index entries in the snapshot.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.buffers.index_count()
    }
}
