//! Updater configuration.

use serde::{Deserialize, Serialize};

use pulsar_publish::DeferredStrategy;
use pulsar_types::{constants, PulsarError, PulsarResult};

/// Configuration for the mesh updater.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Latitude/longitude division count. Vertex and index counts scale
    /// quadratically with it. Must be at least 1; fixed for the updater's
    /// lifetime.
    pub divisions: u32,

    /// Rebuild the (time-independent) index buffer every frame.
    ///
    /// Topology never changes for a fixed division count, so this is off
    /// by default; turning it on matches the naive baseline whose upload
    /// cost the harness characterizes.
    pub rebuild_topology_each_frame: bool,

    /// Buffer-handoff strategy for deferred publishes.
    pub deferred_strategy: DeferredStrategy,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            divisions: constants::DEFAULT_DIVISIONS,
            rebuild_topology_each_frame: false,
            deferred_strategy: DeferredStrategy::Snapshot,
        }
    }
}

impl UpdaterConfig {
    /// Validates configuration values.
    pub fn validate(&self) -> PulsarResult<()> {
        if self.divisions == 0 {
            return Err(PulsarError::InvalidConfig(
                "divisions must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Config matching the naive baseline: topology rebuilt every frame.
    pub fn naive_baseline() -> Self {
        Self {
            rebuild_topology_each_frame: true,
            ..Default::default()
        }
    }

    /// Config reproducing the original deferred-publish race.
    pub fn racy_repro() -> Self {
        Self {
            deferred_strategy: DeferredStrategy::LiveBuffers,
            ..Default::default()
        }
    }
}
