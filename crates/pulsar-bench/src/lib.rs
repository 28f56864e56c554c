//! # pulsar-bench
//!
//! Drives a [`pulsar_engine::MeshUpdater`] through a fixed number of
//! frames per update mode and collects wall-time and publish metrics —
//! the characterization run the harness exists for.

pub mod metrics;
pub mod runner;

pub use metrics::UpdateMetrics;
pub use runner::{FrameLoop, FrameScenario};
