//! # pulsar-engine
//!
//! The per-frame update pipeline: a frame driver calls
//! [`MeshUpdater::update`] once per rendered frame, and the current
//! [`UpdateMode`] decides whether the regenerated geometry stays internal,
//! becomes an artifact, or is published to the consumer — synchronously or
//! as a deferred task.
//!
//! ## Key Types
//!
//! - [`UpdateMode`] — Four-state machine, advanced only by the caller.
//! - [`UpdaterConfig`] — Divisions, topology-rebuild parity flag, deferred
//!   strategy.
//! - [`MeshUpdater`] — Owns the generator, mode, and publish state.
//! - [`UpdateResult`] — Sequence, wall time, and per-mode outcome.

pub mod config;
pub mod mode;
pub mod updater;

pub use config::UpdaterConfig;
pub use mode::UpdateMode;
pub use updater::{MeshUpdater, UpdateOutcome, UpdateResult};
