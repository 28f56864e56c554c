//! Integration tests for pulsar-publish.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use parking_lot::Mutex;

use pulsar_mesh::{MeshBuffers, SphereMeshGenerator};
use pulsar_publish::deferred::apply_ordered;
use pulsar_publish::{
    MeshArtifact, MeshConsumer, ModelSlot, NullConsumer, PublishOutcome, PublishTask,
    SharedConsumer,
};
use pulsar_types::{FrameSeq, PulsarError, PulsarResult};

fn sphere_buffers(time: f64) -> MeshBuffers {
    let mut gen = SphereMeshGenerator::new(4).unwrap();
    gen.compute_vertices(time);
    gen.buffers().clone()
}

// ─── Artifact Tests ───────────────────────────────────────────

#[test]
fn artifact_build_ok() {
    let buffers = sphere_buffers(0.5);
    let artifact = MeshArtifact::build(&buffers, FrameSeq(7)).unwrap();
    assert_eq!(artifact.seq(), FrameSeq(7));
    assert_eq!(artifact.vertex_count(), 25);
    assert_eq!(artifact.index_count(), 96);
}

#[test]
fn artifact_build_rejects_malformed_buffers() {
    let mut buffers = sphere_buffers(0.5);
    buffers.indices[0] = 999;
    let err = MeshArtifact::build(&buffers, FrameSeq(1)).unwrap_err();
    assert!(matches!(err, PulsarError::InvalidArtifact(_)));
}

#[test]
fn artifact_clones_share_snapshot() {
    let buffers = sphere_buffers(0.5);
    let artifact = MeshArtifact::build(&buffers, FrameSeq(1)).unwrap();
    let clone = artifact.clone();
    assert_eq!(clone.buffers().pos_y, artifact.buffers().pos_y);
}

// ─── Consumer Tests ───────────────────────────────────────────

#[test]
fn model_slot_holds_latest() {
    let mut slot = ModelSlot::new();
    assert!(slot.current().is_none());

    let artifact = MeshArtifact::build(&sphere_buffers(0.5), FrameSeq(3)).unwrap();
    slot.replace_mesh(artifact).unwrap();
    assert_eq!(slot.current_seq(), Some(FrameSeq(3)));
    assert_eq!(slot.replace_count(), 1);
}

#[test]
fn null_consumer_discards() {
    let mut null = NullConsumer::new();
    let artifact = MeshArtifact::build(&sphere_buffers(0.5), FrameSeq(1)).unwrap();
    null.replace_mesh(artifact).unwrap();
    assert_eq!(null.replace_count(), 1);
}

// ─── Ordered Apply Tests ──────────────────────────────────────

#[test]
fn apply_ordered_drops_stale() {
    let slot = Arc::new(Mutex::new(ModelSlot::new()));
    let consumer: SharedConsumer = slot.clone();
    let watermark = AtomicU64::new(0);

    let newer = MeshArtifact::build(&sphere_buffers(1.0), FrameSeq(5)).unwrap();
    let older = MeshArtifact::build(&sphere_buffers(0.0), FrameSeq(2)).unwrap();

    let outcome = apply_ordered(&consumer, &watermark, newer).unwrap();
    assert_eq!(outcome, PublishOutcome::Applied { seq: FrameSeq(5) });

    let outcome = apply_ordered(&consumer, &watermark, older).unwrap();
    assert_eq!(
        outcome,
        PublishOutcome::Stale {
            seq: FrameSeq(2),
            newest: FrameSeq(5)
        }
    );
    assert_eq!(slot.lock().current_seq(), Some(FrameSeq(5)));
    assert_eq!(slot.lock().replace_count(), 1);
}

// ─── Deferred Task Tests ──────────────────────────────────────

#[test]
fn snapshot_task_publishes_dispatch_time_geometry() {
    let slot = Arc::new(Mutex::new(ModelSlot::new()));
    let consumer: SharedConsumer = slot.clone();
    let watermark = Arc::new(AtomicU64::new(0));

    let artifact = MeshArtifact::build(&sphere_buffers(0.0), FrameSeq(1)).unwrap();
    let expected_y = artifact.buffers().pos_y[0];
    let task = PublishTask::snapshot(artifact, consumer, watermark);
    assert_eq!(task.seq(), FrameSeq(1));

    let outcome = task.complete().unwrap();
    assert_eq!(outcome, PublishOutcome::Applied { seq: FrameSeq(1) });

    let slot = slot.lock();
    let current = slot.current().unwrap();
    assert_eq!(current.buffers().pos_y[0], expected_y);
}

#[test]
fn live_task_publishes_completion_time_geometry() {
    let slot = Arc::new(Mutex::new(ModelSlot::new()));
    let consumer: SharedConsumer = slot.clone();
    let watermark = Arc::new(AtomicU64::new(0));

    let generator = Arc::new(Mutex::new(SphereMeshGenerator::new(4).unwrap()));
    generator.lock().compute_vertices(0.0);
    let task = PublishTask::live(FrameSeq(1), generator.clone(), consumer, watermark);

    // A later frame overwrites the shared buffers before the task runs
    generator.lock().compute_vertices(std::f64::consts::FRAC_PI_2);

    task.complete().unwrap();
    let slot = slot.lock();
    let current = slot.current().unwrap();
    // The task was dispatched for frame 1 but carries the later geometry
    assert_eq!(current.seq(), FrameSeq(1));
    assert!((current.buffers().pos_y[0] - 1.0).abs() < 1e-6);
}

#[test]
fn spawned_task_is_joinable() {
    let slot = Arc::new(Mutex::new(ModelSlot::new()));
    let consumer: SharedConsumer = slot.clone();
    let watermark = Arc::new(AtomicU64::new(0));

    let artifact = MeshArtifact::build(&sphere_buffers(0.5), FrameSeq(1)).unwrap();
    let handle = PublishTask::snapshot(artifact, consumer, watermark).spawn();
    assert_eq!(handle.seq(), FrameSeq(1));

    let outcome = handle.wait().unwrap();
    assert_eq!(outcome, PublishOutcome::Applied { seq: FrameSeq(1) });
    assert_eq!(slot.lock().replace_count(), 1);
}

// ─── Rejection Tests ──────────────────────────────────────────

struct RejectingConsumer;

impl MeshConsumer for RejectingConsumer {
    fn replace_mesh(&mut self, _artifact: MeshArtifact) -> PulsarResult<()> {
        Err(PulsarError::PublishRejected("slot refused the artifact".into()))
    }

    fn name(&self) -> &str {
        "rejecting"
    }

    fn replace_count(&self) -> u32 {
        0
    }
}

#[test]
fn consumer_rejection_surfaces_as_error() {
    let consumer: SharedConsumer = Arc::new(Mutex::new(RejectingConsumer));
    let watermark = Arc::new(AtomicU64::new(0));

    let artifact = MeshArtifact::build(&sphere_buffers(0.5), FrameSeq(1)).unwrap();
    let err = PublishTask::snapshot(artifact, consumer, watermark)
        .complete()
        .unwrap_err();
    assert!(matches!(err, PulsarError::PublishRejected(_)));
}
