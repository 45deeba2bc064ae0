//! Brush stroke representation

use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::{Aabb, GridRegion};

/// Whether a stroke raises or lowers field values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrushMode {
    /// Raise values toward 1
    #[default]
    Add,
    /// Lower values toward 0
    Remove,
}

/// A single spherical brush stroke in field space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushStroke {
    pub center: Vec3,
    pub radius: f32,
    pub mode: BrushMode,
}

impl BrushStroke {
    pub fn new(center: Vec3, radius: f32, mode: BrushMode) -> Self {
        Self { center, radius, mode }
    }

    /// Create a stroke that raises values
    pub fn add(center: Vec3, radius: f32) -> Self {
        Self::new(center, radius, BrushMode::Add)
    }

    /// Create a stroke that lowers values
    pub fn remove(center: Vec3, radius: f32) -> Self {
        Self::new(center, radius, BrushMode::Remove)
    }

    /// Axis-aligned box `center ± radius`
    pub fn world_bounds(&self) -> Aabb {
        Aabb::from_center_half_extent(self.center, Vec3::splat(self.radius))
    }

    /// Grid points the stroke may touch in a field of `size` cubes per axis
    pub fn grid_region(&self, size: UVec3) -> GridRegion {
        GridRegion::clamped(&self.world_bounds(), size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let add = BrushStroke::add(Vec3::ONE, 2.0);
        assert_eq!(add.mode, BrushMode::Add);
        assert_eq!(add.radius, 2.0);

        let remove = BrushStroke::remove(Vec3::ZERO, 1.0);
        assert_eq!(remove.mode, BrushMode::Remove);
        assert_eq!(BrushMode::default(), BrushMode::Add);
    }

    #[test]
    fn test_world_bounds() {
        let stroke = BrushStroke::add(Vec3::new(4.0, 5.0, 6.0), 1.5);
        let bounds = stroke.world_bounds();
        assert_eq!(bounds.min, Vec3::new(2.5, 3.5, 4.5));
        assert_eq!(bounds.max, Vec3::new(5.5, 6.5, 7.5));
    }

    #[test]
    fn test_grid_region_clamps_to_field() {
        let size = UVec3::new(8, 4, 8);

        let inner = BrushStroke::add(Vec3::new(4.0, 2.0, 4.0), 1.5).grid_region(size);
        assert_eq!(inner.min, UVec3::new(2, 0, 2));
        assert_eq!(inner.max, UVec3::new(6, 4, 6));

        // Partially outside: clamped, upper bound inclusive of the last grid point
        let edge = BrushStroke::add(Vec3::new(7.5, 3.5, -0.5), 2.0).grid_region(size);
        assert_eq!(edge.min, UVec3::new(5, 1, 0));
        assert_eq!(edge.max, UVec3::new(8, 4, 2));

        let outside = BrushStroke::remove(Vec3::new(100.0, 2.0, 4.0), 3.0).grid_region(size);
        assert!(outside.is_empty());
    }

    #[test]
    fn test_negative_radius_is_empty() {
        let region = BrushStroke::add(Vec3::splat(2.0), -1.0).grid_region(UVec3::splat(4));
        assert!(region.is_empty());
    }
}
