//! Brush system for sculpting scalar fields
//!
//! Spherical strokes raise or lower samples by a fixed step with a linear
//! falloff toward the stroke radius.

pub mod stroke;
pub mod apply;
pub mod session;

// Re-exports
pub use stroke::{BrushMode, BrushStroke};
pub use apply::{apply_brush, BrushReport, BRUSH_STEP};
pub use session::BrushSession;
