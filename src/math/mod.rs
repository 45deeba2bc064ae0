//! Bounds used by the brush editor and mesh statistics

pub mod aabb;
pub mod grid_region;

pub use aabb::Aabb;
pub use grid_region::GridRegion;
