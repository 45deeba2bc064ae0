//! Marching cubes isosurface extraction over a dense scalar field

use glam::UVec3;
use serde::{Deserialize, Serialize};

use super::crossings::{edge_crossing, EdgeCrossings, EdgeKey};
use super::tables::{cube_configuration, triangulation, CORNER_OFFSETS, EDGE_CORNERS};
use super::MeshData;
use crate::voxel::ScalarField;

/// Settings read by one mesh build
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshSettings {
    /// Threshold separating inside (below) from outside
    pub surface: f32,
    /// Interpolate crossings along edges instead of taking midpoints
    pub smooth_terrain: bool,
    /// Weld vertices shared by neighbouring cubes
    pub smooth_shading: bool,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            surface: 0.5,
            smooth_terrain: true,
            smooth_shading: false,
        }
    }
}

/// Builds triangle meshes from scalar fields
#[derive(Clone, Copy, Debug, Default)]
pub struct Mesher {
    settings: MeshSettings,
}

impl Mesher {
    pub fn new(settings: MeshSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MeshSettings {
        &self.settings
    }

    /// Build a new mesh from `field`, which must hold `size + 1` samples per axis
    pub fn build(&self, field: &ScalarField, size: UVec3) -> MeshData {
        let mut mesh = MeshData::new();
        self.build_into(field, size, &mut mesh);
        mesh
    }

    /// Rebuild `mesh` in place from `field`.
    ///
    /// Both buffers are cleared first. Panics if the field extent does not
    /// match `size`.
    pub fn build_into(&self, field: &ScalarField, size: UVec3, mesh: &mut MeshData) {
        assert_eq!(
            field.dims(),
            size + UVec3::ONE,
            "field extent does not match terrain size {size}"
        );

        mesh.clear();

        let mut crossings = self
            .settings
            .smooth_shading
            .then(|| EdgeCrossings::compute(field, &self.settings));

        for x in 0..size.x {
            for y in 0..size.y {
                for z in 0..size.z {
                    let cube = UVec3::new(x, y, z);
                    let samples = field.sample_cube(cube);
                    self.march_cube(cube, &samples, crossings.as_mut(), mesh);
                }
            }
        }

        log::debug!(
            "Meshed {} cubes: {} vertices, {} triangles (welded: {}, crossed edges: {})",
            size.x * size.y * size.z,
            mesh.vertex_count(),
            mesh.triangle_count(),
            self.settings.smooth_shading,
            crossings.as_ref().map_or(0, EdgeCrossings::len),
        );
    }

    /// Emit the triangles of one cube, returning how many were added.
    ///
    /// `crossings` is present only when vertices are welded.
    pub fn march_cube(
        &self,
        cube: UVec3,
        samples: &[f32; 8],
        mut crossings: Option<&mut EdgeCrossings>,
        mesh: &mut MeshData,
    ) -> usize {
        let surface = self.settings.surface;
        let config = cube_configuration(samples, surface);
        if config == 0 || config == 255 {
            return 0;
        }

        let mut emitted = 0;
        for edge in triangulation(config) {
            let [a, b] = EDGE_CORNERS[edge];
            let position = || {
                edge_crossing(
                    (cube + CORNER_OFFSETS[a]).as_vec3(),
                    (cube + CORNER_OFFSETS[b]).as_vec3(),
                    samples[a],
                    samples[b],
                    surface,
                    self.settings.smooth_terrain,
                )
            };

            let index = match crossings.as_deref_mut() {
                Some(crossings) => crossings.vertex_for(
                    EdgeKey::for_cube_edge(cube, edge),
                    position,
                    &mut mesh.vertices,
                ),
                None => mesh.push_vertex(position()),
            };
            mesh.triangles.push(index);
            emitted += 1;
        }

        emitted / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn settings(smooth_terrain: bool, smooth_shading: bool) -> MeshSettings {
        MeshSettings { surface: 0.5, smooth_terrain, smooth_shading }
    }

    /// Deterministic pseudo-random field in [0, 1)
    fn hashed_field(size: UVec3, seed: u32) -> ScalarField {
        ScalarField::from_fn(size, |p| {
            let mut h = seed ^ p.x.wrapping_mul(0x9e37_79b1);
            h = (h ^ p.y).wrapping_mul(0x45d9_f3b);
            h ^= h >> 16;
            h = (h ^ p.z).wrapping_mul(0x45d9_f3b);
            h ^= h >> 16;
            (h & 0xffff) as f32 / 65536.0
        })
    }

    fn all_modes() -> [MeshSettings; 4] {
        [settings(false, false), settings(true, false), settings(false, true), settings(true, true)]
    }

    #[test]
    fn test_uniform_fields_are_empty() {
        let size = UVec3::splat(4);
        for s in all_modes() {
            let mesher = Mesher::new(s);
            assert!(mesher.build(&ScalarField::filled(size, 0.0), size).is_empty());
            assert!(mesher.build(&ScalarField::filled(size, 1.0), size).is_empty());
            let mesh = mesher.build(&ScalarField::filled(size, 1.0), size);
            assert_eq!(mesh.vertex_count(), 0);
        }
    }

    #[test]
    fn test_empty_configurations_emit_nothing() {
        let mesher = Mesher::default();
        let mut mesh = MeshData::new();
        assert_eq!(mesher.march_cube(UVec3::ZERO, &[0.1; 8], None, &mut mesh), 0);
        assert_eq!(mesher.march_cube(UVec3::ZERO, &[0.9; 8], None, &mut mesh), 0);
        assert_eq!(mesh.vertex_count(), 0);

        let mut corner = [0.9; 8];
        corner[0] = 0.1;
        assert_eq!(mesher.march_cube(UVec3::ZERO, &corner, None, &mut mesh), 1);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_buffers_are_consistent() {
        let size = UVec3::new(6, 5, 7);
        for seed in 0..4 {
            let field = hashed_field(size, seed);
            for s in all_modes() {
                let mesh = Mesher::new(s).build(&field, size);
                assert!(!mesh.is_empty());
                assert_eq!(mesh.triangles.len() % 3, 0);
                assert!(mesh.validate().is_ok());
            }
        }
    }

    #[test]
    fn test_midpoints_lie_on_cube_edges() {
        let size = UVec3::splat(5);
        let field = hashed_field(size, 7);
        let mesh = Mesher::new(settings(false, false)).build(&field, size);

        for v in &mesh.vertices {
            let halves = v.to_array().iter().filter(|c| c.fract() == 0.5).count();
            let whole = v.to_array().iter().filter(|c| c.fract() == 0.0).count();
            assert_eq!((halves, whole), (1, 2), "{v} is not an edge midpoint");
            assert!(v.cmpge(Vec3::ZERO).all() && v.cmple(size.as_vec3()).all());
        }
    }

    #[test]
    fn test_linear_field_interpolates_exact_root() {
        let size = UVec3::new(4, 3, 3);
        let field = ScalarField::from_fn(size, |p| p.x as f32 / size.x as f32);
        let s = MeshSettings { surface: 0.37, smooth_terrain: true, smooth_shading: false };
        let mesh = Mesher::new(s).build(&field, size);

        assert!(!mesh.is_empty());
        for v in &mesh.vertices {
            assert!((v.x - 0.37 * size.x as f32).abs() < 1e-5, "{v}");
        }
    }

    #[test]
    fn test_plane_cross_section() {
        let size = UVec3::new(3, 4, 2);
        let plane = 2;
        let field = ScalarField::from_fn(size, |p| if p.y == plane { 0.5 } else { 0.0 });
        let mesh = Mesher::new(settings(true, false)).build(&field, size);

        // The cube layers just below and just above the plane each get a quad
        let crossed_cubes = 2 * size.x * size.z;
        assert_eq!(mesh.triangle_count(), 2 * crossed_cubes as usize);
        for v in &mesh.vertices {
            assert_eq!(v.y, plane as f32);
        }
    }

    #[test]
    fn test_welding_shares_vertices_between_neighbours() {
        // Two cubes side by side with the bottom layer inside
        let size = UVec3::new(2, 1, 1);
        let field = ScalarField::from_fn(size, |p| if p.y == 0 { 0.0 } else { 1.0 });

        let flat = Mesher::new(settings(true, false)).build(&field, size);
        let welded = Mesher::new(settings(true, true)).build(&field, size);

        assert_eq!(flat.triangle_count(), 4);
        assert_eq!(welded.triangle_count(), 4);
        assert_eq!(flat.vertex_count(), 12);
        // Six vertical edges, each crossed once
        assert_eq!(welded.vertex_count(), 6);
    }

    #[test]
    fn test_welding_preserves_triangle_positions() {
        let size = UVec3::splat(6);
        let field = hashed_field(size, 11);
        for smooth_terrain in [false, true] {
            let flat = Mesher::new(settings(smooth_terrain, false)).build(&field, size);
            let welded = Mesher::new(settings(smooth_terrain, true)).build(&field, size);

            assert_eq!(flat.triangle_count(), welded.triangle_count());
            assert!(welded.vertex_count() < flat.vertex_count());
            for i in 0..flat.triangle_count() {
                assert_eq!(flat.triangle(i), welded.triangle(i));
            }
        }
    }

    #[test]
    fn test_welded_midpoints_are_unique() {
        let size = UVec3::splat(5);
        let field = hashed_field(size, 3);
        let mesh = Mesher::new(settings(false, true)).build(&field, size);

        let mut seen = std::collections::HashSet::new();
        for v in &mesh.vertices {
            assert!(seen.insert(v.to_array().map(f32::to_bits)), "duplicate vertex {v}");
        }
    }

    #[test]
    fn test_build_into_clears_previous_mesh() {
        let size = UVec3::splat(3);
        let field = hashed_field(size, 5);
        let mesher = Mesher::default();

        let mut mesh = mesher.build(&field, size);
        let expected = mesh.clone();
        mesher.build_into(&field, size, &mut mesh);
        assert_eq!(mesh, expected);
    }

    #[test]
    #[should_panic(expected = "field extent")]
    fn test_mismatched_extent_panics() {
        let field = ScalarField::new(UVec3::splat(3));
        Mesher::default().build(&field, UVec3::splat(4));
    }
}
