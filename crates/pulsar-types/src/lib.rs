//! # pulsar-types
//!
//! Shared types, identifiers, error types, and defaults for the Pulsar
//! mesh-update harness.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Pulsar crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{PulsarError, PulsarResult};
pub use ids::FrameSeq;
pub use scalar::Scalar;
