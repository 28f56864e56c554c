//! Error types for the Pulsar harness.
//!
//! All crates return `PulsarResult<T>` from fallible operations.
//! The original reproduction app aborted the process on every failure
//! path; here each fallible boundary reports a typed error instead.

use thiserror::Error;

/// Unified error type for the Pulsar harness.
#[derive(Debug, Error)]
pub enum PulsarError {
    /// Configuration value is invalid (e.g., zero divisions).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Mesh buffer data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Artifact construction from mesh buffers failed.
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    /// The mesh consumer rejected a replace operation.
    #[error("Publish rejected: {0}")]
    PublishRejected(String),

    /// I/O operation failed (e.g., writing a metrics report).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, PulsarError>`.
pub type PulsarResult<T> = Result<T, PulsarError>;
