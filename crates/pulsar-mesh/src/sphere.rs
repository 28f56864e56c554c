//! Procedural generator for the pulsing UV sphere.
//!
//! The sphere is parameterized by a latitude/longitude grid with
//! `divisions` steps along each axis. Its radius oscillates with time:
//! `radius(t) = (sin(t) + 1) / 2`, always in `[0, 1]`. The vertex pass
//! rewrites the same preallocated buffers every frame; the index pass is
//! topology-only and never changes for a fixed division count.

use std::f32::consts::{PI, TAU};

use pulsar_types::constants::NORMALIZE_EPSILON;
use pulsar_types::{PulsarError, PulsarResult, Scalar};

use crate::mesh::MeshBuffers;

/// Regenerates a UV sphere whose radius oscillates over time.
///
/// Buffer sizes are fixed at construction: `(divisions + 1)²` vertices and
/// `divisions² · 6` indices. `divisions` is immutable for the generator's
/// lifetime and the buffers are never resized.
pub struct SphereMeshGenerator {
    divisions: u32,
    buffers: MeshBuffers,
}

impl SphereMeshGenerator {
    /// Creates a generator with zero-initialized buffers and the triangle
    /// topology already built.
    ///
    /// Fails with [`PulsarError::InvalidConfig`] when `divisions == 0`.
    pub fn new(divisions: u32) -> PulsarResult<Self> {
        if divisions == 0 {
            return Err(PulsarError::InvalidConfig(
                "Sphere divisions must be at least 1".into(),
            ));
        }

        let side = divisions as usize + 1;
        let d = divisions as usize;
        let mut generator = Self {
            divisions,
            buffers: MeshBuffers::zeroed(side * side, d * d * 6),
        };
        generator.compute_indices();
        Ok(generator)
    }

    /// Returns the division count along each grid axis.
    #[inline]
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Returns the current buffer contents.
    #[inline]
    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    /// Sphere radius at the given time: `(sin(time) + 1) / 2`, in `[0, 1]`.
    #[inline]
    pub fn pulse_radius(time: f64) -> Scalar {
        ((time.sin() + 1.0) / 2.0) as Scalar
    }

    /// Recomputes vertex positions and normals for the given time, in place.
    ///
    /// Pure function of `time` and `divisions`: identical inputs produce
    /// identical buffer contents. Performs no allocation.
    ///
    /// Each normal is the unit-length direction of its position from the
    /// origin. When the radius is 0 (at `sin(time) = -1`) every position is
    /// the origin and the normals are left as zero vectors — a documented
    /// degenerate case, not silently patched.
    pub fn compute_vertices(&mut self, time: f64) {
        let d = self.divisions as usize;
        let side = d + 1;
        let radius = Self::pulse_radius(time);

        for i in 0..=d {
            let latitude = i as f32 * PI / d as f32;
            let (sin_lat, cos_lat) = latitude.sin_cos();
            let y = radius * cos_lat;
            let ring = radius * sin_lat;

            for j in 0..=d {
                let longitude = j as f32 * TAU / d as f32;
                let (sin_lon, cos_lon) = longitude.sin_cos();
                let x = ring * sin_lon;
                let z = ring * cos_lon;
                let idx = i * side + j;

                self.buffers.pos_x[idx] = x;
                self.buffers.pos_y[idx] = y;
                self.buffers.pos_z[idx] = z;

                let len = (x * x + y * y + z * z).sqrt();
                if len > NORMALIZE_EPSILON {
                    let inv = 1.0 / len;
                    self.buffers.normal_x[idx] = x * inv;
                    self.buffers.normal_y[idx] = y * inv;
                    self.buffers.normal_z[idx] = z * inv;
                } else {
                    self.buffers.normal_x[idx] = 0.0;
                    self.buffers.normal_y[idx] = 0.0;
                    self.buffers.normal_z[idx] = 0.0;
                }
            }
        }
    }

    /// Rebuilds the triangle index buffer, two triangles per grid quad.
    ///
    /// Topology depends only on `divisions`, so the output is identical on
    /// every call. `new` runs this once; re-running it per frame is only
    /// useful for parity with the naive baseline being characterized.
    pub fn compute_indices(&mut self) {
        let d = self.divisions as usize;
        let side = (d + 1) as u32;

        for i in 0..d {
            for j in 0..d {
                let first = (i as u32) * side + j as u32;
                let second = first + side;
                let offset = (i * d + j) * 6;

                self.buffers.indices[offset] = first;
                self.buffers.indices[offset + 1] = second;
                self.buffers.indices[offset + 2] = first + 1;

                self.buffers.indices[offset + 3] = second;
                self.buffers.indices[offset + 4] = second + 1;
                self.buffers.indices[offset + 5] = first + 1;
            }
        }
    }
}
