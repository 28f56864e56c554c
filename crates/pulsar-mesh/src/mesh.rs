//! Mesh buffers with SoA (Structure of Arrays) layout.
//!
//! Each coordinate channel is stored contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! The buffers are allocated once at their exact final size and mutated
//! in place every frame — the per-frame path never reallocates.

use serde::{Deserialize, Serialize};

use pulsar_types::{PulsarError, PulsarResult, Scalar};

/// Vertex position, vertex normal, and triangle index buffers.
///
/// Positions and normals are stored in separate per-channel contiguous
/// arrays. Triangle indices reference into these arrays, three per
/// triangle, counter-clockwise winding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshBuffers {
    // --- Vertex data (SoA) ---
    /// X coordinates of all vertices.
    pub pos_x: Vec<Scalar>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<Scalar>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<Scalar>,

    /// X components of vertex normals.
    pub normal_x: Vec<Scalar>,
    /// Y components of vertex normals.
    pub normal_y: Vec<Scalar>,
    /// Z components of vertex normals.
    pub normal_z: Vec<Scalar>,

    // --- Triangle data ---
    /// Triangle indices — each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Creates zero-initialized buffers at their exact final size.
    ///
    /// `index_count` must be divisible by 3.
    pub fn zeroed(vertex_count: usize, index_count: usize) -> Self {
        Self {
            pos_x: vec![0.0; vertex_count],
            pos_y: vec![0.0; vertex_count],
            pos_z: vec![0.0; vertex_count],
            normal_x: vec![0.0; vertex_count],
            normal_y: vec![0.0; vertex_count],
            normal_z: vec![0.0; vertex_count],
            indices: vec![0; index_count],
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of index entries (3 per triangle).
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [Scalar; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the position as a `glam::Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> glam::Vec3 {
        glam::Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the normal as a `glam::Vec3`.
    #[inline]
    pub fn normal_vec3(&self, i: usize) -> glam::Vec3 {
        glam::Vec3::new(self.normal_x[i], self.normal_y[i], self.normal_z[i])
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Validates buffer integrity.
    ///
    /// Checks:
    /// - All SoA channels have the same length
    /// - Index count is divisible by 3
    /// - Triangle indices are within bounds
    /// - No triangle repeats a vertex index
    pub fn validate(&self) -> PulsarResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(PulsarError::InvalidMesh(
                "Position channels have inconsistent lengths".into(),
            ));
        }
        if self.normal_x.len() != n || self.normal_y.len() != n || self.normal_z.len() != n {
            return Err(PulsarError::InvalidMesh(
                "Normal channels have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(PulsarError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(PulsarError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(PulsarError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }
}
