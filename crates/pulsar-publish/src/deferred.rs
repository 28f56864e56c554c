//! Deferred publish tasks.
//!
//! A deferred publish is an explicit unit of work created at dispatch time
//! and completed later — either synchronously by the caller (tests sequence
//! completions deterministically this way) or on a worker thread via
//! [`PublishTask::spawn`]. Completion order relative to later frames is not
//! guaranteed; what happens when a publish is overtaken depends on the
//! configured [`DeferredStrategy`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use pulsar_mesh::SphereMeshGenerator;
use pulsar_types::{FrameSeq, PulsarError, PulsarResult};

use crate::artifact::MeshArtifact;
use crate::consumer::SharedConsumer;

/// How a deferred publish obtains its buffer contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredStrategy {
    /// Read the generator's shared buffers at *completion* time.
    ///
    /// This reproduces the original hazard: the buffers are rewritten at
    /// the start of every frame, so an in-flight task that completes after
    /// a later frame publishes that later frame's geometry, and the
    /// consumer ends up with whichever task completed last.
    LiveBuffers,

    /// Copy the buffers into an artifact at *dispatch* time.
    ///
    /// Stale completions (sequence older than the newest already applied)
    /// are dropped, making the final consumer state last-call-wins
    /// regardless of completion order.
    Snapshot,
}

impl Default for DeferredStrategy {
    fn default() -> Self {
        Self::Snapshot
    }
}

impl DeferredStrategy {
    /// Returns the strategy name used in configs and CLI flags.
    pub fn name(self) -> &'static str {
        match self {
            Self::LiveBuffers => "live_buffers",
            Self::Snapshot => "snapshot",
        }
    }

    /// Parses a strategy name as written in configs and CLI flags.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "live_buffers" | "live" => Some(Self::LiveBuffers),
            "snapshot" => Some(Self::Snapshot),
            _ => None,
        }
    }
}

/// Result of a completed publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublishOutcome {
    /// The consumer's mesh was replaced with this frame's artifact.
    Applied {
        /// Frame that produced the applied artifact.
        seq: FrameSeq,
    },
    /// The artifact was older than one already applied and was dropped.
    Stale {
        /// Frame that produced the dropped artifact.
        seq: FrameSeq,
        /// Newest sequence applied so far.
        newest: FrameSeq,
    },
}

/// Applies an artifact to the consumer, dropping it when stale.
///
/// The watermark holds the newest applied sequence number (0 = none yet)
/// and is only read or written under the consumer lock, so a completed
/// older task can never clobber a newer artifact.
pub fn apply_ordered(
    consumer: &SharedConsumer,
    watermark: &AtomicU64,
    artifact: MeshArtifact,
) -> PulsarResult<PublishOutcome> {
    let seq = artifact.seq();
    let mut consumer = consumer.lock();

    let newest = watermark.load(Ordering::Acquire);
    if seq.value() <= newest {
        tracing::debug!(seq = seq.value(), newest, "dropping stale publish");
        return Ok(PublishOutcome::Stale {
            seq,
            newest: FrameSeq(newest),
        });
    }

    consumer.replace_mesh(artifact)?;
    watermark.store(seq.value(), Ordering::Release);
    Ok(PublishOutcome::Applied { seq })
}

enum TaskSource {
    /// Dispatch-time copy, applied through the sequence watermark.
    Snapshot(MeshArtifact),
    /// Completion-time read of the live, shared generator buffers.
    Live(Arc<Mutex<SphereMeshGenerator>>),
}

/// An explicit deferred publish unit.
///
/// Created by the updater in deferred mode and handed back to the caller,
/// who either runs it in place with [`complete`](Self::complete) or moves
/// it to a worker thread with [`spawn`](Self::spawn). Fire-and-forget
/// after spawn; there is no cancellation or timeout.
pub struct PublishTask {
    seq: FrameSeq,
    source: TaskSource,
    consumer: SharedConsumer,
    watermark: Arc<AtomicU64>,
}

impl PublishTask {
    /// Creates a snapshot-strategy task from a dispatch-time artifact.
    pub fn snapshot(
        artifact: MeshArtifact,
        consumer: SharedConsumer,
        watermark: Arc<AtomicU64>,
    ) -> Self {
        Self {
            seq: artifact.seq(),
            source: TaskSource::Snapshot(artifact),
            consumer,
            watermark,
        }
    }

    /// Creates a live-buffers-strategy task reading the shared generator
    /// at completion time.
    pub fn live(
        seq: FrameSeq,
        generator: Arc<Mutex<SphereMeshGenerator>>,
        consumer: SharedConsumer,
        watermark: Arc<AtomicU64>,
    ) -> Self {
        Self {
            seq,
            source: TaskSource::Live(generator),
            consumer,
            watermark,
        }
    }

    /// Frame this task was dispatched for.
    #[inline]
    pub fn seq(&self) -> FrameSeq {
        self.seq
    }

    /// Builds the artifact (if not snapshotted at dispatch) and hands it to
    /// the consumer, on the calling thread.
    pub fn complete(self) -> PulsarResult<PublishOutcome> {
        match self.source {
            TaskSource::Snapshot(artifact) => {
                apply_ordered(&self.consumer, &self.watermark, artifact)
            }
            TaskSource::Live(generator) => {
                // Whatever the shared buffers hold *now* — a later frame may
                // already have overwritten this task's geometry.
                let artifact = {
                    let generator = generator.lock();
                    MeshArtifact::build(generator.buffers(), self.seq)?
                };
                let mut consumer = self.consumer.lock();
                consumer.replace_mesh(artifact)?;
                self.watermark.fetch_max(self.seq.value(), Ordering::AcqRel);
                Ok(PublishOutcome::Applied { seq: self.seq })
            }
        }
    }

    /// Moves the task to a worker thread and returns a joinable handle.
    pub fn spawn(self) -> PublishHandle {
        let seq = self.seq;
        let handle = std::thread::spawn(move || self.complete());
        PublishHandle { seq, handle }
    }
}

impl std::fmt::Debug for PublishTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strategy = match self.source {
            TaskSource::Snapshot(_) => DeferredStrategy::Snapshot,
            TaskSource::Live(_) => DeferredStrategy::LiveBuffers,
        };
        f.debug_struct("PublishTask")
            .field("seq", &self.seq)
            .field("strategy", &strategy)
            .finish_non_exhaustive()
    }
}

/// Handle to a spawned deferred publish.
pub struct PublishHandle {
    seq: FrameSeq,
    handle: JoinHandle<PulsarResult<PublishOutcome>>,
}

impl PublishHandle {
    /// Frame the spawned task was dispatched for.
    #[inline]
    pub fn seq(&self) -> FrameSeq {
        self.seq
    }

    /// Blocks until the worker finishes and returns its outcome.
    pub fn wait(self) -> PulsarResult<PublishOutcome> {
        self.handle.join().map_err(|_| {
            PulsarError::PublishRejected("deferred publish worker panicked".into())
        })?
    }
}
