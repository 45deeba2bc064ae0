//! Voxel data structures and operations

pub mod field;
pub mod brush;

pub use field::ScalarField;
pub use brush::{apply_brush, BrushMode, BrushReport, BrushSession, BrushStroke};
