//! Noise-based procedural scalar field generation

use glam::{UVec3, Vec3};

use super::config::{GeneratorKind, TerrainParams};
use super::noise::{contrast, NoiseSampler};
use crate::voxel::ScalarField;

/// Horizontal nudge keeping the flat heightmap off the noise lattice,
/// where every sample would be exactly 0.5
const FLAT_LATTICE_NUDGE: f32 = 0.001;

/// Landscape values fall by one unit every eight cells of height
const LANDSCAPE_FALLOFF: f32 = 8.0;

/// Fills scalar fields from [`TerrainParams`]
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    params: TerrainParams,
    noise: NoiseSampler,
}

impl TerrainGenerator {
    /// Create a new generator with the given parameters
    pub fn new(params: TerrainParams) -> Self {
        let noise = NoiseSampler::new(params.seed);
        Self { params, noise }
    }

    /// Get generator parameters
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Generate a field of `size + 1` samples per axis
    pub fn generate(&self, size: UVec3) -> ScalarField {
        let mut field = ScalarField::new(size);
        self.fill(&mut field);
        field
    }

    /// Overwrite every sample of `field` in place
    pub fn fill(&self, field: &mut ScalarField) {
        let size = field.cube_count();
        let dims = field.dims();
        let values = field.values_mut();

        // Same x-fastest order as the field's own indexing
        let mut i = 0;
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    values[i] = self.sample(UVec3::new(x, y, z), size);
                    i += 1;
                }
            }
        }

        log::debug!(
            "Generated {:?} field of {} samples (seed {}, solid edges: {})",
            self.params.generator,
            values.len(),
            self.params.seed,
            self.params.solid_edges,
        );
    }

    /// Value of a single grid point in a terrain of `size` cubes
    pub fn sample(&self, p: UVec3, size: UVec3) -> f32 {
        if self.params.solid_edges && on_boundary(p, size) {
            return f32::MIN;
        }

        let pos = p.as_vec3();
        match self.params.generator {
            GeneratorKind::Perlin3D => self.perlin_3d(pos),
            GeneratorKind::Flat => self.flat(pos, size.y as f32),
            GeneratorKind::Landscape => self.landscape(pos),
        }
    }

    fn perlin_3d(&self, pos: Vec3) -> f32 {
        let v = self.noise.perlin_3d(pos, self.params.scale, self.params.offset);
        match self.params.contrast {
            Some(factor) => contrast(v, factor),
            None => v,
        }
    }

    fn flat(&self, pos: Vec3, height_extent: f32) -> f32 {
        let f = self.params.frequency;
        let height = height_extent
            * self
                .noise
                .noise_2d(pos.x * f + FLAT_LATTICE_NUDGE, pos.z * f + FLAT_LATTICE_NUDGE);

        // 0 below height - 0.5, 1 above height + 0.5
        let point = (pos.y - height + 0.5).clamp(0.0, 1.0);
        1.0 - point
    }

    fn landscape(&self, pos: Vec3) -> f32 {
        let x = pos.x + self.params.offset.x;
        let z = pos.z + self.params.offset.z;
        let hills = self
            .noise
            .layered_2d(x, z, self.params.amplitude, self.params.frequency);
        0.5 + hills - pos.y / LANDSCAPE_FALLOFF
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(TerrainParams::default())
    }
}

#[inline]
fn on_boundary(p: UVec3, size: UVec3) -> bool {
    p.cmpeq(UVec3::ZERO).any() || p.cmpeq(size).any()
}
