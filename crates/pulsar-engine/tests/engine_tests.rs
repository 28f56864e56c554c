//! Integration tests for pulsar-engine.

use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use parking_lot::Mutex;

use pulsar_engine::{MeshUpdater, UpdateMode, UpdateOutcome, UpdaterConfig};
use pulsar_publish::{
    MeshArtifact, MeshConsumer, ModelSlot, PublishOutcome, SharedConsumer,
};
use pulsar_types::{FrameSeq, PulsarError, PulsarResult};

fn small_config() -> UpdaterConfig {
    UpdaterConfig {
        divisions: 4,
        ..Default::default()
    }
}

fn updater_with_slot(config: UpdaterConfig) -> (MeshUpdater, Arc<Mutex<ModelSlot>>) {
    let slot = Arc::new(Mutex::new(ModelSlot::new()));
    let consumer: SharedConsumer = slot.clone();
    let updater = MeshUpdater::new(config, consumer).unwrap();
    (updater, slot)
}

// ─── Mode Machine Tests ───────────────────────────────────────

#[test]
fn four_advances_return_to_start() {
    let mut mode = UpdateMode::VertexDataOnly;
    for _ in 0..4 {
        mode = mode.advance();
    }
    assert_eq!(mode, UpdateMode::VertexDataOnly);
}

#[test]
fn cycle_order_matches_characterization_sweep() {
    assert_eq!(
        UpdateMode::all(),
        [
            UpdateMode::VertexDataOnly,
            UpdateMode::GenerateOnly,
            UpdateMode::GenerateAndPublish,
            UpdateMode::GenerateAndPublishDeferred,
        ]
    );
}

#[test]
fn mode_names_roundtrip() {
    for mode in UpdateMode::all() {
        assert_eq!(UpdateMode::from_name(mode.name()), Some(mode));
    }
    assert_eq!(UpdateMode::from_name("deferred"), Some(UpdateMode::GenerateAndPublishDeferred));
    assert_eq!(UpdateMode::from_name("bogus"), None);
}

#[test]
fn updater_never_advances_its_own_mode() {
    let (mut updater, _slot) = updater_with_slot(small_config());
    updater.update(0.1).unwrap();
    updater.update(0.2).unwrap();
    assert_eq!(updater.mode(), UpdateMode::VertexDataOnly);

    assert_eq!(updater.advance_mode(), UpdateMode::GenerateOnly);
    assert_eq!(updater.mode(), UpdateMode::GenerateOnly);
}

// ─── Construction Tests ───────────────────────────────────────

#[test]
fn zero_divisions_rejected() {
    let slot = Arc::new(Mutex::new(ModelSlot::new()));
    let consumer: SharedConsumer = slot;
    let config = UpdaterConfig {
        divisions: 0,
        ..Default::default()
    };
    let err = MeshUpdater::new(config, consumer).unwrap_err();
    assert!(matches!(err, PulsarError::InvalidConfig(_)));
}

// ─── Per-Mode Behavior Tests ──────────────────────────────────

#[test]
fn vertex_data_only_produces_no_artifact() {
    let (mut updater, slot) = updater_with_slot(small_config());
    let result = updater.update(FRAC_PI_2).unwrap();

    assert_eq!(result.seq, FrameSeq(1));
    assert!(matches!(result.outcome, UpdateOutcome::Computed));
    assert!(updater.last_artifact().is_none());
    assert!(slot.lock().current().is_none());

    // The internal buffers were recomputed
    let generator = updater.generator().lock();
    assert!((generator.buffers().pos_y[0] - 1.0).abs() < 1e-6);
}

#[test]
fn generate_only_retains_internally() {
    let (mut updater, slot) = updater_with_slot(small_config());
    updater.set_mode(UpdateMode::GenerateOnly);
    let result = updater.update(0.5).unwrap();

    assert!(matches!(result.outcome, UpdateOutcome::Generated));
    assert_eq!(updater.last_artifact().unwrap().seq(), FrameSeq(1));
    assert!(slot.lock().current().is_none());
}

#[test]
fn generate_and_publish_updates_consumer_before_returning() {
    let (mut updater, slot) = updater_with_slot(small_config());
    updater.set_mode(UpdateMode::GenerateAndPublish);

    let result = updater.update(0.5).unwrap();
    match result.outcome {
        UpdateOutcome::Published(PublishOutcome::Applied { seq }) => {
            assert_eq!(seq, FrameSeq(1));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(slot.lock().current_seq(), Some(FrameSeq(1)));

    updater.update(0.6).unwrap();
    assert_eq!(slot.lock().current_seq(), Some(FrameSeq(2)));
    assert_eq!(slot.lock().replace_count(), 2);
}

#[test]
fn naive_baseline_rebuilds_topology_per_frame() {
    let (mut updater, _slot) = updater_with_slot(UpdaterConfig {
        divisions: 4,
        ..UpdaterConfig::naive_baseline()
    });
    updater.update(0.3).unwrap();
    let generator = updater.generator().lock();
    assert!(generator.buffers().validate().is_ok());
}

// ─── Deferred Mode Tests ──────────────────────────────────────

#[test]
fn deferred_update_returns_task_without_publishing() {
    let (mut updater, slot) = updater_with_slot(small_config());
    updater.set_mode(UpdateMode::GenerateAndPublishDeferred);

    let result = updater.update(0.5).unwrap();
    let task = result.into_task().expect("deferred frame should carry a task");
    assert!(slot.lock().current().is_none());

    let outcome = task.complete().unwrap();
    assert_eq!(outcome, PublishOutcome::Applied { seq: FrameSeq(1) });
    assert_eq!(slot.lock().current_seq(), Some(FrameSeq(1)));
}

#[test]
fn live_buffers_hazard_completion_order_wins() {
    let (mut updater, slot) = updater_with_slot(UpdaterConfig {
        divisions: 4,
        ..UpdaterConfig::racy_repro()
    });
    updater.set_mode(UpdateMode::GenerateAndPublishDeferred);

    // Two rapid frames: radius 0.5 at t=0, radius 1.0 at t=π/2
    let task1 = updater.update(0.0).unwrap().into_task().unwrap();
    let task2 = updater.update(FRAC_PI_2).unwrap().into_task().unwrap();

    // Frame 2's publish overtakes frame 1's
    task2.complete().unwrap();
    task1.complete().unwrap();

    let slot = slot.lock();
    let current = slot.current().unwrap();
    // Last completion owns the slot, and both tasks read the live buffers,
    // which frame 2 had already overwritten
    assert_eq!(current.seq(), FrameSeq(1));
    assert!((current.buffers().pos_y[0] - 1.0).abs() < 1e-6);
    assert_eq!(slot.replace_count(), 2);
}

#[test]
fn snapshot_strategy_makes_last_call_win() {
    let (mut updater, slot) = updater_with_slot(small_config());
    updater.set_mode(UpdateMode::GenerateAndPublishDeferred);

    let task1 = updater.update(0.0).unwrap().into_task().unwrap();
    let task2 = updater.update(FRAC_PI_2).unwrap().into_task().unwrap();

    // Completed out of order: the overtaken frame is dropped as stale
    assert_eq!(
        task2.complete().unwrap(),
        PublishOutcome::Applied { seq: FrameSeq(2) }
    );
    assert_eq!(
        task1.complete().unwrap(),
        PublishOutcome::Stale {
            seq: FrameSeq(1),
            newest: FrameSeq(2)
        }
    );

    let slot = slot.lock();
    let current = slot.current().unwrap();
    assert_eq!(current.seq(), FrameSeq(2));
    assert!((current.buffers().pos_y[0] - 1.0).abs() < 1e-6);
    assert_eq!(slot.replace_count(), 1);
}

#[test]
fn snapshot_tasks_carry_dispatch_time_geometry() {
    let (mut updater, slot) = updater_with_slot(small_config());
    updater.set_mode(UpdateMode::GenerateAndPublishDeferred);

    let task1 = updater.update(0.0).unwrap().into_task().unwrap();
    // A later frame mutates the live buffers before task1 completes
    let _task2 = updater.update(FRAC_PI_2).unwrap().into_task().unwrap();

    task1.complete().unwrap();
    let slot = slot.lock();
    // Frame 1's snapshot still holds radius 0.5 geometry
    assert!((slot.current().unwrap().buffers().pos_y[0] - 0.5).abs() < 1e-6);
}

// ─── Failure Propagation Tests ────────────────────────────────

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
fn sync_publish_rejection_propagates() {
    let consumer: SharedConsumer = Arc::new(Mutex::new(RejectingConsumer));
    let mut updater = MeshUpdater::new(small_config(), consumer).unwrap();
    updater.set_mode(UpdateMode::GenerateAndPublish);

    let err = updater.update(0.5).unwrap_err();
    assert!(matches!(err, PulsarError::PublishRejected(_)));
}
