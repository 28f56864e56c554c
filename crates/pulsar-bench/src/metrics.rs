//! Metrics collected during a characterization run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use pulsar_types::PulsarResult;

/// Metrics for one mode's frame loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMetrics {
    /// Update mode name.
    pub mode: String,
    /// Number of frames executed.
    pub frames: u32,
    /// Total wall-clock time including deferred completions (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per update call (seconds).
    pub avg_frame_time: f64,
    /// Minimum update call time.
    pub min_frame_time: f64,
    /// Maximum update call time.
    pub max_frame_time: f64,
    /// Artifacts built during the run.
    pub artifacts_built: u32,
    /// Publishes applied to the consumer.
    pub publishes_applied: u32,
    /// Stale publishes dropped.
    pub publishes_skipped: u32,
    /// Vertex count of the generated mesh.
    pub vertex_count: usize,
    /// Index count of the generated mesh.
    pub index_count: usize,
}

impl UpdateMetrics {
    /// CSV header matching `to_csv_row`.
    pub fn to_csv_header() -> String {
        "mode,vertex_count,index_count,frames,total_wall_time_s,avg_frame_ms,min_frame_ms,max_frame_ms,artifacts_built,publishes_applied,publishes_skipped".to_string()
    }

    /// Formats this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.6},{:.4},{:.4},{:.4},{},{},{}",
            self.mode,
            self.vertex_count,
            self.index_count,
            self.frames,
            self.total_wall_time,
            self.avg_frame_time * 1000.0,
            self.min_frame_time * 1000.0,
            self.max_frame_time * 1000.0,
            self.artifacts_built,
            self.publishes_applied,
            self.publishes_skipped,
        )
    }

    /// Formats a full CSV document for a set of runs.
    pub fn to_csv(all: &[UpdateMetrics]) -> String {
        let mut out = Self::to_csv_header();
        for metrics in all {
            out.push('\n');
            out.push_str(&metrics.to_csv_row());
        }
        out.push('\n');
        out
    }

    /// Writes a full CSV document for a set of runs to `path`.
    pub fn write_csv(path: &Path, all: &[UpdateMetrics]) -> PulsarResult<()> {
        std::fs::write(path, Self::to_csv(all))?;
        Ok(())
    }
}
