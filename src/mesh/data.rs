//! Indexed triangle buffers produced by a mesh build

use glam::Vec3;

use crate::core::{Error, Result};
use crate::math::Aabb;

/// Vertex buffer plus triangle index buffer (three indices per triangle)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty both buffers, keeping their allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, position: Vec3) -> u32 {
        let index = u32::try_from(self.vertices.len()).unwrap_or(u32::MAX);
        assert!(index != u32::MAX, "vertex buffer exceeds u32 indices");
        self.vertices.push(position);
        index
    }

    /// Corner positions of triangle `i`
    pub fn triangle(&self, i: usize) -> [Vec3; 3] {
        let t = &self.triangles[i * 3..i * 3 + 3];
        [
            self.vertices[t[0] as usize],
            self.vertices[t[1] as usize],
            self.vertices[t[2] as usize],
        ]
    }

    /// Bounds of all vertices, or `None` for an empty vertex buffer
    pub fn bounds(&self) -> Option<Aabb> {
        let (first, rest) = self.vertices.split_first()?;
        let mut bounds = Aabb::new(*first, *first);
        for v in rest {
            bounds.expand(*v);
        }
        Some(bounds)
    }

    /// Check the consumer contract: whole triangles, indices in range
    pub fn validate(&self) -> Result<()> {
        if self.triangles.len() % 3 != 0 {
            return Err(Error::Mesh(format!(
                "triangle buffer length {} is not a multiple of 3",
                self.triangles.len()
            )));
        }
        if let Some(&bad) = self.triangles.iter().find(|&&i| i as usize >= self.vertices.len()) {
            return Err(Error::Mesh(format!(
                "triangle index {} out of range for {} vertices",
                bad,
                self.vertices.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        MeshData {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 0.0, 1.0), Vec3::Z],
            triangles: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn test_counts() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(!mesh.is_empty());
        assert_eq!(mesh.triangle(1), [Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0), Vec3::Z]);
    }

    #[test]
    fn test_clear_and_push() {
        let mut mesh = quad();
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.push_vertex(Vec3::ONE), 0);
        assert_eq!(mesh.push_vertex(Vec3::ONE), 1);
    }

    #[test]
    fn test_bounds() {
        assert!(MeshData::new().bounds().is_none());
        let bounds = quad().bounds().unwrap();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_validate() {
        assert!(quad().validate().is_ok());

        let mut mesh = quad();
        mesh.triangles.push(0);
        assert!(matches!(mesh.validate(), Err(Error::Mesh(_))));

        let mut mesh = quad();
        mesh.triangles[4] = 4;
        assert!(mesh.validate().is_err());
    }
}
