//! # pulsar-mesh
//!
//! Mesh buffers with Structure-of-Arrays (SoA) layout and the procedural
//! generator for the pulsing UV sphere.
//!
//! ## Key Types
//!
//! - [`MeshBuffers`] — Position, normal, and index channels in contiguous
//!   SoA buffers, allocated once at exact final size.
//! - [`SphereMeshGenerator`] — Regenerates the sphere's vertex data from a
//!   time value, in place, every frame.

pub mod mesh;
pub mod sphere;

pub use mesh::MeshBuffers;
pub use sphere::SphereMeshGenerator;
