//! Inclusive integer boxes of grid points

use glam::{IVec3, UVec3};

use super::Aabb;

/// Inclusive box of grid points `min..=max` on every axis.
///
/// Built by clamping a world-space [`Aabb`] onto a field whose grid points
/// run from `0` to `size` inclusive. A region whose clamped bounds cross
/// over is empty and yields no points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRegion {
    pub min: UVec3,
    pub max: UVec3,
    empty: bool,
}

impl GridRegion {
    /// An empty region
    pub const EMPTY: Self = Self {
        min: UVec3::ZERO,
        max: UVec3::ZERO,
        empty: true,
    };

    /// Region covering every grid point of a field with `size` cubes per axis
    pub fn full(size: UVec3) -> Self {
        Self { min: UVec3::ZERO, max: size, empty: false }
    }

    /// Clamp `bounds` onto the grid `[0, size]`.
    ///
    /// The lower corner is floored and the upper corner ceiled, so every grid
    /// point inside `bounds` is covered.
    pub fn clamped(bounds: &Aabb, size: UVec3) -> Self {
        let lo = bounds.min.floor();
        let hi = bounds.max.ceil();
        if !lo.is_finite() || !hi.is_finite() {
            return Self::EMPTY;
        }

        let size = size.as_ivec3();
        let min = lo.as_ivec3().max(IVec3::ZERO);
        let max = hi.as_ivec3().min(size);

        if min.cmpgt(max).any() {
            return Self::EMPTY;
        }

        Self {
            min: min.as_uvec3(),
            max: max.as_uvec3(),
            empty: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Number of grid points in the region
    pub fn point_count(&self) -> usize {
        if self.empty {
            return 0;
        }
        let extent = self.max - self.min + UVec3::ONE;
        extent.x as usize * extent.y as usize * extent.z as usize
    }

    /// Iterate every grid point, x fastest
    pub fn iter(&self) -> impl Iterator<Item = UVec3> + use<> {
        let (min, max) = (self.min, self.max);
        let z_range = if self.empty { 1..=0 } else { min.z..=max.z };
        z_range.flat_map(move |z| {
            (min.y..=max.y).flat_map(move |y| {
                (min.x..=max.x).map(move |x| UVec3::new(x, y, z))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_clamped_inside() {
        let bounds = Aabb::from_center_half_extent(Vec3::splat(4.0), Vec3::splat(1.5));
        let region = GridRegion::clamped(&bounds, UVec3::splat(8));
        assert_eq!(region.min, UVec3::splat(2));
        assert_eq!(region.max, UVec3::splat(6));
        assert_eq!(region.point_count(), 125);
        assert_eq!(region.iter().count(), 125);
    }

    #[test]
    fn test_clamped_reaches_upper_boundary() {
        let bounds = Aabb::from_center_half_extent(Vec3::splat(7.5), Vec3::splat(2.0));
        let region = GridRegion::clamped(&bounds, UVec3::splat(8));
        assert_eq!(region.max, UVec3::splat(8));
        assert_eq!(region.iter().last(), Some(UVec3::splat(8)));
    }

    #[test]
    fn test_clamped_outside_is_empty() {
        let bounds = Aabb::from_center_half_extent(Vec3::splat(40.0), Vec3::splat(2.0));
        let region = GridRegion::clamped(&bounds, UVec3::splat(8));
        assert!(region.is_empty());
        assert_eq!(region.point_count(), 0);
        assert_eq!(region.iter().count(), 0);

        let bounds = Aabb::from_center_half_extent(Vec3::splat(-10.0), Vec3::splat(2.0));
        assert!(GridRegion::clamped(&bounds, UVec3::splat(8)).is_empty());
    }

    #[test]
    fn test_iter_order_x_fastest() {
        let region = GridRegion::full(UVec3::new(1, 1, 1));
        let points: Vec<UVec3> = region.iter().collect();
        assert_eq!(points[0], UVec3::new(0, 0, 0));
        assert_eq!(points[1], UVec3::new(1, 0, 0));
        assert_eq!(points[2], UVec3::new(0, 1, 0));
        assert_eq!(points.len(), 8);
    }
}
