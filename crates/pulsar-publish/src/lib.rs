//! # pulsar-publish
//!
//! The publish side of the harness: immutable mesh artifacts, the
//! consumer interface that receives them, and the deferred-publish task
//! machinery with its two buffer-handoff strategies.
//!
//! ## Key Types
//!
//! - [`MeshArtifact`] — Immutable, sequence-tagged snapshot built from
//!   mesh buffers through validation.
//! - [`MeshConsumer`] — The external "model" holding the displayed mesh,
//!   with [`ModelSlot`] and [`NullConsumer`] implementations.
//! - [`PublishTask`] — An explicit, observable deferred publish whose
//!   completion tests can sequence deterministically.

pub mod artifact;
pub mod consumer;
pub mod deferred;

pub use artifact::MeshArtifact;
pub use consumer::{MeshConsumer, ModelSlot, NullConsumer, SharedConsumer};
pub use deferred::{DeferredStrategy, PublishHandle, PublishOutcome, PublishTask};
