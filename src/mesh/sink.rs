//! Narrow interface to whatever consumes finished geometry
//!
//! A renderer, collider or file writer only ever sees the two buffers; it is
//! responsible for recomputing normals itself.

use glam::Vec3;

use super::MeshData;

/// Receives the buffers of every finished mesh build.
///
/// Triangle indices always point into the vertex slice handed over in the
/// same call, and the triangle slice always holds whole triangles.
pub trait GeometrySink {
    fn set_geometry(&mut self, vertices: &[Vec3], triangles: &[u32]);
}

impl GeometrySink for MeshData {
    fn set_geometry(&mut self, vertices: &[Vec3], triangles: &[u32]) {
        self.clear();
        self.vertices.extend_from_slice(vertices);
        self.triangles.extend_from_slice(triangles);
    }
}

impl<F> GeometrySink for F
where
    F: FnMut(&[Vec3], &[u32]),
{
    fn set_geometry(&mut self, vertices: &[Vec3], triangles: &[u32]) {
        self(vertices, triangles)
    }
}
