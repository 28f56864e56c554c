//! Harness defaults.

/// Default latitude/longitude division count for the pulsing sphere.
pub const DEFAULT_DIVISIONS: u32 = 32;

/// Default frame interval (seconds). 1/60th of a second.
pub const DEFAULT_DT: f64 = 1.0 / 60.0;

/// Default frame count for characterization runs.
pub const DEFAULT_FRAMES: u32 = 240;

/// Epsilon for floating-point comparisons in tests and validation.
pub const EPSILON: f32 = 1.0e-6;

/// Length threshold below which a position is treated as degenerate
/// and its normal left as the zero vector.
pub const NORMALIZE_EPSILON: f32 = 1.0e-10;
