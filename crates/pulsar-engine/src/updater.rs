//! The per-frame mesh update pipeline.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use pulsar_mesh::SphereMeshGenerator;
use pulsar_publish::deferred::apply_ordered;
use pulsar_publish::{
    DeferredStrategy, MeshArtifact, PublishOutcome, PublishTask, SharedConsumer,
};
use pulsar_types::{FrameSeq, PulsarResult};

use crate::config::UpdaterConfig;
use crate::mode::UpdateMode;

/// Result of one frame update.
#[derive(Debug)]
pub struct UpdateResult {
    /// Sequence number assigned to this frame.
    pub seq: FrameSeq,
    /// Mode the frame ran in.
    pub mode: UpdateMode,
    /// Wall-clock time spent in `update` (seconds). For deferred frames
    /// this covers dispatch only, not completion.
    pub wall_time: f64,
    /// What the mode did with the regenerated geometry.
    pub outcome: UpdateOutcome,
}

/// Per-mode outcome of a frame update.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// Vertex data recomputed; no artifact produced.
    Computed,
    /// Artifact built and retained internally.
    Generated,
    /// Artifact handed to the consumer before `update` returned.
    Published(PublishOutcome),
    /// Publish dispatched as a task the caller completes or spawns.
    Deferred(PublishTask),
}

impl UpdateResult {
    /// Takes the deferred task out of the result, if this frame produced one.
    pub fn into_task(self) -> Option<PublishTask> {
        match self.outcome {
            UpdateOutcome::Deferred(task) => Some(task),
            _ => None,
        }
    }
}

/// Drives the sphere generator once per frame and publishes per the
/// current [`UpdateMode`].
///
/// The generator lives behind a shared lock so live-buffer deferred tasks
/// can read it from worker threads; every frame still mutates the same
/// preallocated buffers in place on the driving thread.
pub struct MeshUpdater {
    config: UpdaterConfig,
    generator: Arc<Mutex<SphereMeshGenerator>>,
    consumer: SharedConsumer,
    mode: UpdateMode,
    next_seq: u64,
    watermark: Arc<AtomicU64>,
    last_artifact: Option<MeshArtifact>,
}

impl std::fmt::Debug for MeshUpdater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshUpdater")
            .field("config", &self.config)
            .field("mode", &self.mode)
            .field("next_seq", &self.next_seq)
            .finish_non_exhaustive()
    }
}

impl MeshUpdater {
    /// Creates an updater in `VertexDataOnly` mode.
    pub fn new(config: UpdaterConfig, consumer: SharedConsumer) -> PulsarResult<Self> {
        config.validate()?;
        let generator = SphereMeshGenerator::new(config.divisions)?;
        Ok(Self {
            config,
            generator: Arc::new(Mutex::new(generator)),
            consumer,
            mode: UpdateMode::VertexDataOnly,
            next_seq: 0,
            watermark: Arc::new(AtomicU64::new(0)),
            last_artifact: None,
        })
    }

    /// Current update mode.
    #[inline]
    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Sets the mode directly.
    pub fn set_mode(&mut self, mode: UpdateMode) {
        self.mode = mode;
    }

    /// Advances to the next mode in the cycle and returns it.
    ///
    /// Stands in for the original app's tap gesture.
    pub fn advance_mode(&mut self) -> UpdateMode {
        self.mode = self.mode.advance();
        self.mode
    }

    /// Updater configuration.
    #[inline]
    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// The shared generator. Locked briefly per frame by `update`;
    /// live-buffer deferred tasks lock it at completion time.
    #[inline]
    pub fn generator(&self) -> &Arc<Mutex<SphereMeshGenerator>> {
        &self.generator
    }

    /// The artifact retained by the most recent `GenerateOnly` frame.
    pub fn last_artifact(&self) -> Option<&MeshArtifact> {
        self.last_artifact.as_ref()
    }

    /// Runs one frame update at the given time (seconds, arbitrary epoch,
    /// monotonically increasing across calls).
    pub fn update(&mut self, time: f64) -> PulsarResult<UpdateResult> {
        let start = Instant::now();
        self.next_seq += 1;
        let seq = FrameSeq(self.next_seq);

        // 1. Regenerate geometry in place
        {
            let mut generator = self.generator.lock();
            generator.compute_vertices(time);
            if self.config.rebuild_topology_each_frame {
                generator.compute_indices();
            }
        }

        // 2. Publish per the current mode
        let outcome = match self.mode {
            UpdateMode::VertexDataOnly => UpdateOutcome::Computed,

            UpdateMode::GenerateOnly => {
                self.last_artifact = Some(self.build_artifact(seq)?);
                UpdateOutcome::Generated
            }

            UpdateMode::GenerateAndPublish => {
                let artifact = self.build_artifact(seq)?;
                let publish = apply_ordered(&self.consumer, &self.watermark, artifact)?;
                UpdateOutcome::Published(publish)
            }

            UpdateMode::GenerateAndPublishDeferred => {
                let task = match self.config.deferred_strategy {
                    DeferredStrategy::Snapshot => PublishTask::snapshot(
                        self.build_artifact(seq)?,
                        self.consumer.clone(),
                        self.watermark.clone(),
                    ),
                    DeferredStrategy::LiveBuffers => PublishTask::live(
                        seq,
                        self.generator.clone(),
                        self.consumer.clone(),
                        self.watermark.clone(),
                    ),
                };
                UpdateOutcome::Deferred(task)
            }
        };

        let wall_time = start.elapsed().as_secs_f64();
        tracing::trace!(
            seq = seq.value(),
            mode = self.mode.name(),
            wall_time,
            "frame update"
        );

        Ok(UpdateResult {
            seq,
            mode: self.mode,
            wall_time,
            outcome,
        })
    }

    fn build_artifact(&self, seq: FrameSeq) -> PulsarResult<MeshArtifact> {
        let generator = self.generator.lock();
        MeshArtifact::build(generator.buffers(), seq)
    }
}
