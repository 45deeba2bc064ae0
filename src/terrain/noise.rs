//! Seeded noise primitives used by the field generator

use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Scales below this are treated as "no scaling"
pub const MIN_SCALE: f32 = 0.001;

/// Default contrast factor for the optional stretch post-step
pub const DEFAULT_CONTRAST: f32 = 10.0;

/// Stretch `v` away from 0.5 by `factor`, clamped to [0, 1]
#[inline]
pub fn contrast(v: f32, factor: f32) -> f32 {
    ((v - 0.5) * factor + 0.5).clamp(0.0, 1.0)
}

/// 2D Perlin noise remapped to [0, 1], with the 3D and layered variants the
/// generator builds from it
#[derive(Clone, Copy, Debug)]
pub struct NoiseSampler {
    perlin: Perlin,
}

impl NoiseSampler {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Single 2D noise sample in [0, 1]
    #[inline]
    pub fn noise_2d(&self, x: f32, y: f32) -> f32 {
        let n = self.perlin.get([x as f64, y as f64]) as f32;
        // Normalize from [-1, 1] to [0, 1]
        ((n + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// 3D noise as the mean of 2D noise over all six ordered axis pairs.
    ///
    /// Coordinates are divided by `scale` (skipped when it is below
    /// [`MIN_SCALE`]) and then shifted by `offset`. Sampling each pair in both
    /// orders cancels the axis-aligned streaks a single 2D slice leaves.
    pub fn perlin_3d(&self, p: Vec3, scale: f32, offset: Vec3) -> f32 {
        let scaled = if scale > MIN_SCALE { p / scale } else { p };
        let p = scaled + offset;

        let xy = self.noise_2d(p.x, p.y);
        let yz = self.noise_2d(p.y, p.z);
        let zx = self.noise_2d(p.z, p.x);

        let xz = self.noise_2d(p.x, p.z);
        let zy = self.noise_2d(p.z, p.y);
        let yx = self.noise_2d(p.y, p.x);

        (xy + yz + zx + xz + zy + yx) / 6.0
    }

    /// Three octaves of 2D noise at frequencies f, 2f, 3f with amplitudes
    /// A, A/4, A/16
    pub fn layered_2d(&self, x: f32, z: f32, amplitude: f32, frequency: f32) -> f32 {
        let mut total = 0.0;
        let mut amp = amplitude;
        for octave in 1..=3 {
            let f = frequency * octave as f32;
            total += amp * self.noise_2d(x * f, z * f);
            amp /= 4.0;
        }
        total
    }
}

impl Default for NoiseSampler {
    fn default() -> Self {
        Self::new(0)
    }
}
