//! The mesh consumer interface — the external "model" object.
//!
//! The consumer exposes one operation, replace-mesh. Synchronous publishes
//! call it on the driving thread; deferred publishes call it from worker
//! threads, so consumers are shared behind [`SharedConsumer`].

use std::sync::Arc;

use parking_lot::Mutex;

use pulsar_types::{FrameSeq, PulsarResult};

use crate::artifact::MeshArtifact;

/// Trait for objects holding the currently displayed mesh.
///
/// # Implementations
/// - [`ModelSlot`] — Holds the latest applied artifact (the standard target)
/// - [`NullConsumer`] — Discards artifacts (benchmarks, CI)
pub trait MeshConsumer: Send {
    /// Replaces the consumer's current mesh with the artifact.
    ///
    /// A rejection surfaces as [`pulsar_types::PulsarError::PublishRejected`]
    /// to the publisher; it never terminates the process.
    fn replace_mesh(&mut self, artifact: MeshArtifact) -> PulsarResult<()>;

    /// Returns the consumer's name for logging.
    fn name(&self) -> &str;

    /// Returns how many replace operations have been applied.
    fn replace_count(&self) -> u32;
}

/// A consumer shared between the frame driver and deferred publish workers.
pub type SharedConsumer = Arc<Mutex<dyn MeshConsumer>>;

/// The standard consumer: a single slot holding the latest applied artifact.
///
/// Whichever publish completes last owns the slot — ordering is the
/// publisher's concern, not the slot's.
pub struct ModelSlot {
    current: Option<MeshArtifact>,
    replaces: u32,
}

impl ModelSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            current: None,
            replaces: 0,
        }
    }

    /// The currently displayed artifact, if any publish has completed.
    pub fn current(&self) -> Option<&MeshArtifact> {
        self.current.as_ref()
    }

    /// Sequence number of the currently displayed artifact.
    pub fn current_seq(&self) -> Option<FrameSeq> {
        self.current.as_ref().map(|a| a.seq())
    }
}

impl Default for ModelSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshConsumer for ModelSlot {
    fn replace_mesh(&mut self, artifact: MeshArtifact) -> PulsarResult<()> {
        self.current = Some(artifact);
        self.replaces += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "model_slot"
    }

    fn replace_count(&self) -> u32 {
        self.replaces
    }
}

/// A consumer that discards every artifact.
///
/// Used for characterization runs where only the upload cost matters.
pub struct NullConsumer {
    replaces: u32,
}

impl NullConsumer {
    /// Creates a new discarding consumer.
    pub fn new() -> Self {
        Self { replaces: 0 }
    }
}

impl Default for NullConsumer {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshConsumer for NullConsumer {
    fn replace_mesh(&mut self, _artifact: MeshArtifact) -> PulsarResult<()> {
        self.replaces += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }

    fn replace_count(&self) -> u32 {
        self.replaces
    }
}
