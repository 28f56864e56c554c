//! Scalar type alias for mesh geometry.
//!
//! Geometry buffers use `f32` (matching GPU vertex formats). Simulation
//! time stays `f64` so a long-running frame clock does not lose precision.

/// The floating-point type used for vertex and normal channels.
pub type Scalar = f32;
