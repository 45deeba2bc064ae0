//! Per-build edge crossing map and vertex cache

use std::collections::HashMap;

use glam::{UVec3, Vec3};

use super::tables::{CORNER_OFFSETS, EDGE_AXES, EDGE_CORNERS};
use super::MeshSettings;
use crate::voxel::ScalarField;

/// Identifies one grid edge: the lower grid point it starts from and its
/// direction (0 = x, 1 = y, 2 = z). Adjacent cubes name a shared edge with
/// the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub origin: UVec3,
    pub axis: u8,
}

impl EdgeKey {
    pub fn new(origin: UVec3, axis: u8) -> Self {
        Self { origin, axis }
    }

    /// Key of cube-local `edge` for the cube whose lowest corner is `cube`
    pub fn for_cube_edge(cube: UVec3, edge: usize) -> Self {
        let [low, _] = EDGE_CORNERS[edge];
        Self::new(cube + CORNER_OFFSETS[low], EDGE_AXES[edge] as u8)
    }

    /// Grid point at the other end of the edge
    pub fn end(&self) -> UVec3 {
        let mut end = self.origin;
        end[self.axis as usize] += 1;
        end
    }
}

/// Position where the surface crosses the edge `p0 -> p1`.
///
/// Without smooth terrain this is the edge midpoint. With it the position is
/// interpolated by `(surface - v0) / (v1 - v0)`; when both samples are equal
/// the fraction falls back to `surface` itself.
#[inline]
pub fn edge_crossing(p0: Vec3, p1: Vec3, v0: f32, v1: f32, surface: f32, smooth_terrain: bool) -> Vec3 {
    if !smooth_terrain {
        return (p0 + p1) / 2.0;
    }

    let difference = v1 - v0;
    let t = if difference == 0.0 {
        surface
    } else {
        (surface - v0) / difference
    };
    p0 + (p1 - p0) * t
}

#[derive(Clone, Copy, Debug)]
struct Crossing {
    position: Vec3,
    vertex: Option<u32>,
}

/// Crossing positions of every grid edge the surface passes through, plus the
/// vertex already emitted for each one.
///
/// Built once per mesh build before marching and dropped with it, so no
/// vertex index ever outlives the buffers it points into.
#[derive(Debug, Default)]
pub struct EdgeCrossings {
    edges: HashMap<EdgeKey, Crossing>,
}

impl EdgeCrossings {
    /// Walk every grid edge of `field` and record where the surface crosses it
    pub fn compute(field: &ScalarField, settings: &MeshSettings) -> Self {
        let dims = field.dims();
        let surface = settings.surface;
        let mut edges = HashMap::new();

        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    let origin = UVec3::new(x, y, z);
                    let v0 = field.get(origin);

                    for axis in 0..3u8 {
                        let key = EdgeKey::new(origin, axis);
                        let end = key.end();
                        if end[axis as usize] >= dims[axis as usize] {
                            continue;
                        }

                        let v1 = field.get(end);
                        if (v0 < surface) == (v1 < surface) {
                            continue;
                        }

                        let position = edge_crossing(
                            origin.as_vec3(),
                            end.as_vec3(),
                            v0,
                            v1,
                            surface,
                            settings.smooth_terrain,
                        );
                        edges.insert(key, Crossing { position, vertex: None });
                    }
                }
            }
        }

        Self { edges }
    }

    /// Number of crossed edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Crossing position of a grid edge, if the surface crosses it
    pub fn position(&self, key: &EdgeKey) -> Option<Vec3> {
        self.edges.get(key).map(|c| c.position)
    }

    /// Vertex already emitted for a grid edge
    pub fn vertex(&self, key: &EdgeKey) -> Option<u32> {
        self.edges.get(key).and_then(|c| c.vertex)
    }

    /// Index of the vertex for `key`, appending it to `vertices` the first
    /// time the edge is seen. `fallback` supplies the position of an edge
    /// missing from the map.
    pub fn vertex_for(
        &mut self,
        key: EdgeKey,
        fallback: impl FnOnce() -> Vec3,
        vertices: &mut Vec<Vec3>,
    ) -> u32 {
        let crossing = self.edges.entry(key).or_insert_with(|| Crossing {
            position: fallback(),
            vertex: None,
        });

        if let Some(index) = crossing.vertex {
            return index;
        }

        let index = u32::try_from(vertices.len()).unwrap_or(u32::MAX);
        assert!(index != u32::MAX, "vertex buffer exceeds u32 indices");
        vertices.push(crossing.position);
        crossing.vertex = Some(index);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_for_cube_edge() {
        let cube = UVec3::new(2, 3, 4);
        // Edge 2 runs 3 -> 2 along x from corner (0,1,0)
        assert_eq!(EdgeKey::for_cube_edge(cube, 2), EdgeKey::new(UVec3::new(2, 4, 4), 0));
        // Edge 11 runs 3 -> 7 along z
        assert_eq!(EdgeKey::for_cube_edge(cube, 11), EdgeKey::new(UVec3::new(2, 4, 4), 2));
        // Neighbouring cubes name their shared edge identically
        let right = UVec3::new(3, 3, 4);
        assert_eq!(EdgeKey::for_cube_edge(cube, 1), EdgeKey::for_cube_edge(right, 3));
        assert_eq!(EdgeKey::for_cube_edge(cube, 1).end(), UVec3::new(3, 4, 4));
    }

    #[test]
    fn test_edge_crossing_midpoint() {
        let p = edge_crossing(Vec3::ZERO, Vec3::X, 0.0, 1.0, 0.3, false);
        assert_eq!(p, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_edge_crossing_interpolated() {
        let p = edge_crossing(Vec3::ZERO, Vec3::Y, 0.2, 0.6, 0.5, true);
        assert!((p.y - 0.75).abs() < 1e-6);
        assert_eq!(p.x, 0.0);
    }

    #[test]
    fn test_edge_crossing_equal_samples_uses_surface() {
        let p = edge_crossing(Vec3::ZERO, Vec3::Z, 0.4, 0.4, 0.3, true);
        assert_eq!(p, Vec3::new(0.0, 0.0, 0.3));
    }

    #[test]
    fn test_edge_crossing_solid_edge_sample() {
        // The most negative float pulls the crossing onto the finite end
        let p = edge_crossing(Vec3::ZERO, Vec3::X, f32::MIN, 0.7, 0.5, true);
        assert_eq!(p, Vec3::X);
    }

    #[test]
    fn test_compute_records_only_crossed_edges() {
        let size = UVec3::splat(2);
        let field = ScalarField::from_fn(size, |p| if p.y == 0 { 0.0 } else { 1.0 });
        let crossings = EdgeCrossings::compute(&field, &MeshSettings::default());

        // Only the y-edges from the bottom layer cross: 3 x 3 of them
        assert_eq!(crossings.len(), 9);
        let key = EdgeKey::new(UVec3::new(1, 0, 2), 1);
        assert_eq!(crossings.position(&key), Some(Vec3::new(1.0, 0.5, 2.0)));
        assert_eq!(crossings.position(&EdgeKey::new(UVec3::new(1, 1, 2), 1)), None);
    }

    #[test]
    fn test_vertex_for_reuses_index() {
        let field = ScalarField::from_fn(UVec3::ONE, |p| p.x as f32);
        let mut crossings = EdgeCrossings::compute(&field, &MeshSettings::default());
        let mut vertices = Vec::new();

        let key = EdgeKey::new(UVec3::ZERO, 0);
        let a = crossings.vertex_for(key, || Vec3::NAN, &mut vertices);
        let b = crossings.vertex_for(key, || Vec3::NAN, &mut vertices);
        assert_eq!(a, 0);
        assert_eq!(a, b);
        assert_eq!(vertices, vec![Vec3::new(0.5, 0.0, 0.0)]);
        assert_eq!(crossings.vertex(&key), Some(0));
    }
}
