//! Isosurface extraction
//!
//! Marches every unit cube of a [`ScalarField`](crate::voxel::ScalarField),
//! looks the cube's corner configuration up in the triangulation table and
//! emits one vertex per referenced edge. With smooth shading enabled the
//! crossing of every grid edge is computed once up front and neighbouring
//! cubes share the resulting vertex.

pub mod tables;
pub mod crossings;
pub mod marching;
pub mod data;
pub mod sink;
mod obj;

pub use crossings::{EdgeCrossings, EdgeKey};
pub use marching::{MeshSettings, Mesher};
pub use data::MeshData;
pub use sink::GeometrySink;
