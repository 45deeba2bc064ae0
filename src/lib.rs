//! Marching-terrain - editable voxel terrain meshed with marching cubes
//!
//! A terrain is a dense scalar field of `(size + 1)^3` samples. The
//! [`terrain`] generators fill it from noise, [`voxel::brush`] strokes sculpt
//! it, and [`mesh`] extracts the isosurface at a threshold as plain vertex and
//! index buffers.

pub mod core;
pub mod math;
pub mod voxel;
pub mod terrain;
pub mod mesh;
