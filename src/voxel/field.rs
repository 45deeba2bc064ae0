//! Dense scalar density field sampled at cube corners

use glam::UVec3;

use crate::core::{Error, Result};
use crate::mesh::tables::CORNER_OFFSETS;

/// Dense grid of density samples.
///
/// A field describing `size` cubes per axis stores `size + 1` samples per
/// axis, since samples live on cube corners. Samples are laid out x fastest,
/// then y, then z.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    dims: UVec3,
    values: Vec<f32>,
}

impl ScalarField {
    /// Allocate a zero-filled field for `size` cubes per axis
    pub fn new(size: UVec3) -> Self {
        Self::filled(size, 0.0)
    }

    /// Allocate a field for `size` cubes per axis with every sample set to `value`
    pub fn filled(size: UVec3, value: f32) -> Self {
        let dims = size + UVec3::ONE;
        let len = dims.x as usize * dims.y as usize * dims.z as usize;
        Self {
            dims,
            values: vec![value; len],
        }
    }

    /// Build a field for `size` cubes per axis, sampling `f` at every grid point
    pub fn from_fn(size: UVec3, mut f: impl FnMut(UVec3) -> f32) -> Self {
        let mut field = Self::new(size);
        for z in 0..field.dims.z {
            for y in 0..field.dims.y {
                for x in 0..field.dims.x {
                    let p = UVec3::new(x, y, z);
                    let i = field.index(p);
                    field.values[i] = f(p);
                }
            }
        }
        field
    }

    /// Samples per axis (`size + 1`)
    #[inline]
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Cubes per axis (`dims - 1`)
    #[inline]
    pub fn cube_count(&self) -> UVec3 {
        self.dims - UVec3::ONE
    }

    #[inline]
    fn index(&self, p: UVec3) -> usize {
        assert!(
            p.cmplt(self.dims).all(),
            "grid point {p} outside field of {} samples",
            self.dims
        );
        p.x as usize + self.dims.x as usize * (p.y as usize + self.dims.y as usize * p.z as usize)
    }

    /// Sample at a grid point. Panics when `p` is out of range.
    #[inline]
    pub fn get(&self, p: UVec3) -> f32 {
        self.values[self.index(p)]
    }

    #[inline]
    pub fn get_mut(&mut self, p: UVec3) -> &mut f32 {
        let i = self.index(p);
        &mut self.values[i]
    }

    #[inline]
    pub fn set(&mut self, p: UVec3, value: f32) {
        let i = self.index(p);
        self.values[i] = value;
    }

    /// The 8 corner samples of the cube whose lowest corner is `cube`,
    /// in `CORNER_OFFSETS` order.
    pub fn sample_cube(&self, cube: UVec3) -> [f32; 8] {
        CORNER_OFFSETS.map(|offset| self.get(cube + offset))
    }

    /// Whether `p` lies on any outer face of the grid
    pub fn is_boundary(&self, p: UVec3) -> bool {
        let last = self.cube_count();
        p.cmpeq(UVec3::ZERO).any() || p.cmpeq(last).any()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Reject fields holding NaN or infinite samples.
    ///
    /// The most negative finite float is a legal sample (solid edges).
    pub fn validate(&self) -> Result<()> {
        match self.values.iter().position(|v| !v.is_finite()) {
            None => Ok(()),
            Some(i) => {
                let dx = self.dims.x as usize;
                let dy = self.dims.y as usize;
                let p = UVec3::new((i % dx) as u32, ((i / dx) % dy) as u32, (i / (dx * dy)) as u32);
                Err(Error::Field(format!("non-finite sample {} at {}", self.values[i], p)))
            }
        }
    }
}
