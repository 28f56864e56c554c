//! Frame loop — executes a scenario with an updater and collects metrics.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use pulsar_engine::{MeshUpdater, UpdateMode, UpdateOutcome, UpdaterConfig};
use pulsar_publish::{DeferredStrategy, ModelSlot, PublishHandle, PublishOutcome, SharedConsumer};
use pulsar_telemetry::{EventBus, EventKind, FrameEvent};
use pulsar_types::{constants, FrameSeq, PulsarResult};

use crate::metrics::UpdateMetrics;

/// A characterization scenario: one mode, driven for a fixed frame count.
#[derive(Debug, Clone)]
pub struct FrameScenario {
    /// Mode every frame runs in.
    pub mode: UpdateMode,
    /// Number of frames to drive.
    pub frames: u32,
    /// Frame interval (seconds); frame `k` runs at time `k * dt`.
    pub dt: f64,
    /// Updater configuration.
    pub config: UpdaterConfig,
}

impl FrameScenario {
    /// Creates a scenario for the given mode with harness defaults.
    pub fn for_mode(mode: UpdateMode) -> Self {
        Self {
            mode,
            frames: constants::DEFAULT_FRAMES,
            dt: constants::DEFAULT_DT,
            config: UpdaterConfig::default(),
        }
    }
}

/// Runs frame scenarios and collects metrics.
pub struct FrameLoop;

impl FrameLoop {
    /// Drives one scenario to completion.
    ///
    /// Deferred tasks are spawned onto worker threads as they are
    /// dispatched and joined after the last frame; their outcomes count
    /// toward the publish totals.
    pub fn run(scenario: &FrameScenario, bus: &mut EventBus) -> PulsarResult<UpdateMetrics> {
        scenario.config.validate()?;

        let consumer: SharedConsumer = Arc::new(Mutex::new(ModelSlot::new()));
        let mut updater = MeshUpdater::new(scenario.config.clone(), consumer)?;
        updater.set_mode(scenario.mode);

        let side = scenario.config.divisions as usize + 1;
        let d = scenario.config.divisions as usize;
        let vertex_count = side * side;
        let index_count = d * d * 6;

        // Snapshot tasks clone the artifact at dispatch; live tasks build
        // from the shared buffers when they complete.
        let live_deferred = scenario.config.deferred_strategy == DeferredStrategy::LiveBuffers;

        let mut frame_times: Vec<f64> = Vec::with_capacity(scenario.frames as usize);
        let mut pending: Vec<PublishHandle> = Vec::new();
        let mut artifacts_built: u32 = 0;
        let mut publishes_applied: u32 = 0;
        let mut publishes_skipped: u32 = 0;

        let total_start = Instant::now();

        for frame in 0..scenario.frames {
            let time = frame as f64 * scenario.dt;
            let seq = FrameSeq(frame as u64 + 1);
            bus.emit(FrameEvent::new(seq, EventKind::FrameBegin { sim_time: time }));

            let result = updater.update(time)?;
            frame_times.push(result.wall_time);

            match result.outcome {
                UpdateOutcome::Computed => {}
                UpdateOutcome::Generated => {
                    artifacts_built += 1;
                    bus.emit(FrameEvent::new(
                        result.seq,
                        EventKind::ArtifactBuilt {
                            vertex_count,
                            index_count,
                        },
                    ));
                }
                UpdateOutcome::Published(outcome) => {
                    artifacts_built += 1;
                    match outcome {
                        PublishOutcome::Applied { seq } => {
                            publishes_applied += 1;
                            bus.emit(FrameEvent::new(
                                result.seq,
                                EventKind::PublishApplied {
                                    seq,
                                    deferred: false,
                                },
                            ));
                        }
                        PublishOutcome::Stale { seq, newest } => {
                            publishes_skipped += 1;
                            bus.emit(FrameEvent::new(
                                result.seq,
                                EventKind::PublishSkipped { seq, newest },
                            ));
                        }
                    }
                }
                UpdateOutcome::Deferred(task) => {
                    if !live_deferred {
                        // The snapshot already exists whether or not the
                        // publish later lands as stale.
                        artifacts_built += 1;
                        bus.emit(FrameEvent::new(
                            result.seq,
                            EventKind::ArtifactBuilt {
                                vertex_count,
                                index_count,
                            },
                        ));
                    }
                    pending.push(task.spawn());
                }
            }

            bus.emit(FrameEvent::new(
                result.seq,
                EventKind::FrameEnd {
                    wall_time: result.wall_time,
                },
            ));
            bus.flush();
        }

        // Join outstanding deferred publishes
        for handle in pending {
            let frame = handle.seq();
            match handle.wait() {
                Ok(PublishOutcome::Applied { seq }) => {
                    if live_deferred {
                        artifacts_built += 1;
                    }
                    publishes_applied += 1;
                    bus.emit(FrameEvent::new(
                        frame,
                        EventKind::PublishApplied {
                            seq,
                            deferred: true,
                        },
                    ));
                }
                Ok(PublishOutcome::Stale { seq, newest }) => {
                    publishes_skipped += 1;
                    bus.emit(FrameEvent::new(
                        frame,
                        EventKind::PublishSkipped { seq, newest },
                    ));
                }
                Err(e) => {
                    bus.emit(FrameEvent::new(
                        frame,
                        EventKind::PublishFailed {
                            seq: frame,
                            reason: e.to_string(),
                        },
                    ));
                    bus.flush();
                    return Err(e);
                }
            }
        }
        bus.flush();

        let total_wall_time = total_start.elapsed().as_secs_f64();
        let avg_frame_time = if frame_times.is_empty() {
            0.0
        } else {
            frame_times.iter().sum::<f64>() / frame_times.len() as f64
        };
        let min_frame_time = if frame_times.is_empty() {
            0.0
        } else {
            frame_times.iter().copied().fold(f64::MAX, f64::min)
        };
        let max_frame_time = frame_times.iter().copied().fold(0.0, f64::max);

        Ok(UpdateMetrics {
            mode: scenario.mode.name().to_string(),
            frames: scenario.frames,
            total_wall_time,
            avg_frame_time,
            min_frame_time,
            max_frame_time,
            artifacts_built,
            publishes_applied,
            publishes_skipped,
            vertex_count,
            index_count,
        })
    }

    /// Runs all four modes with the same config and frame count.
    pub fn run_all_modes(
        config: &UpdaterConfig,
        frames: u32,
        bus: &mut EventBus,
    ) -> PulsarResult<Vec<UpdateMetrics>> {
        let mut results = Vec::new();
        for mode in UpdateMode::all() {
            let scenario = FrameScenario {
                mode,
                frames,
                dt: constants::DEFAULT_DT,
                config: config.clone(),
            };
            results.push(Self::run(&scenario, bus)?);
        }
        Ok(results)
    }
}
