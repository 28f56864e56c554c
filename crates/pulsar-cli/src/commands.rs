//! CLI command implementations.

use std::sync::Arc;

use parking_lot::Mutex;

use pulsar_bench::{FrameLoop, UpdateMetrics};
use pulsar_engine::{MeshUpdater, UpdateMode, UpdateOutcome, UpdaterConfig};
use pulsar_mesh::SphereMeshGenerator;
use pulsar_publish::{
    DeferredStrategy, MeshArtifact, MeshConsumer, ModelSlot, PublishHandle, SharedConsumer,
};
use pulsar_telemetry::{EventBus, TracingSink};
use pulsar_types::constants::DEFAULT_DT;
use pulsar_types::FrameSeq;

fn parse_mode(name: &str) -> Result<UpdateMode, Box<dyn std::error::Error>> {
    UpdateMode::from_name(name).ok_or_else(|| {
        format!(
            "Unknown mode: '{name}'. Available: vertex_data_only, generate_only, \
             generate_and_publish, generate_and_publish_deferred"
        )
        .into()
    })
}

fn parse_strategy(name: &str) -> Result<DeferredStrategy, Box<dyn std::error::Error>> {
    DeferredStrategy::from_name(name)
        .ok_or_else(|| format!("Unknown deferred strategy: '{name}'. Available: snapshot, live").into())
}

/// Drive the updater frame by frame, optionally cycling the mode.
pub fn run(
    frames: u32,
    divisions: u32,
    mode_name: &str,
    cycle_every: Option<u32>,
    strategy_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mode = parse_mode(mode_name)?;
    let config = UpdaterConfig {
        divisions,
        deferred_strategy: parse_strategy(strategy_name)?,
        ..Default::default()
    };

    let slot = Arc::new(Mutex::new(ModelSlot::new()));
    let consumer: SharedConsumer = slot.clone();
    let mut updater = MeshUpdater::new(config, consumer)?;
    updater.set_mode(mode);

    println!("Pulsar Run");
    println!("──────────");
    println!("Frames:    {frames}");
    println!("Divisions: {divisions}");
    println!("Mode:      {}", mode.name());
    println!();

    let mut pending: Vec<PublishHandle> = Vec::new();

    for frame in 0..frames {
        if let Some(n) = cycle_every {
            if n > 0 && frame > 0 && frame % n == 0 {
                let next = updater.advance_mode();
                println!("[frame {frame}] mode → {}", next.name());
            }
        }

        let time = frame as f64 * DEFAULT_DT;
        let result = updater.update(time)?;
        if let UpdateOutcome::Deferred(task) = result.outcome {
            pending.push(task.spawn());
        }
    }

    let mut deferred_applied = 0u32;
    let mut deferred_skipped = 0u32;
    for handle in pending {
        match handle.wait()? {
            pulsar_publish::PublishOutcome::Applied { .. } => deferred_applied += 1,
            pulsar_publish::PublishOutcome::Stale { .. } => deferred_skipped += 1,
        }
    }

    let slot = slot.lock();
    println!();
    println!("Replaces applied:  {}", slot.replace_count());
    println!("Deferred applied:  {deferred_applied}");
    println!("Deferred skipped:  {deferred_skipped}");
    match slot.current_seq() {
        Some(FrameSeq(seq)) => println!("Displayed frame:   {seq}"),
        None => println!("Displayed frame:   none"),
    }
    Ok(())
}

/// Characterize all four update modes.
pub fn bench(
    frames: u32,
    divisions: u32,
    rebuild_topology: bool,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Pulsar Characterization");
    println!("═══════════════════════");
    println!();

    let config = UpdaterConfig {
        divisions,
        rebuild_topology_each_frame: rebuild_topology,
        ..Default::default()
    };

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new()));

    let all = FrameLoop::run_all_modes(&config, frames, &mut bus)
        .map_err(|e| format!("Characterization failed: {e}"))?;
    bus.finalize();

    for metrics in &all {
        println!(
            "Mode: {} ({} verts, {} indices, {} frames)",
            metrics.mode, metrics.vertex_count, metrics.index_count, metrics.frames,
        );
        println!("  Wall time:   {:.3}s", metrics.total_wall_time);
        println!("  Avg frame:   {:.3}ms", metrics.avg_frame_time * 1000.0);
        println!("  Max frame:   {:.3}ms", metrics.max_frame_time * 1000.0);
        println!("  Applied:     {}", metrics.publishes_applied);
        println!("  Skipped:     {}", metrics.publishes_skipped);
        println!();
    }

    if let Some(path) = output_path {
        UpdateMetrics::write_csv(std::path::Path::new(path), &all)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", UpdateMetrics::to_csv(&all));
    }

    Ok(())
}

/// Build one frame and validate buffers plus artifact construction.
pub fn validate(divisions: u32) -> Result<(), Box<dyn std::error::Error>> {
    println!("Pulsar Validate");
    println!("───────────────");

    let mut generator = SphereMeshGenerator::new(divisions)?;
    generator.compute_vertices(0.5);
    generator.buffers().validate()?;

    let artifact = MeshArtifact::build(generator.buffers(), FrameSeq(1))?;

    println!("Divisions:  {divisions}");
    println!("Vertices:   {}", artifact.vertex_count());
    println!("Indices:    {}", artifact.index_count());
    println!("Radius(t=0.5): {:.4}", SphereMeshGenerator::pulse_radius(0.5));
    println!("OK");
    Ok(())
}
