//! Applying brush strokes to a scalar field

use glam::UVec3;

use super::stroke::{BrushMode, BrushStroke};
use crate::math::GridRegion;
use crate::voxel::ScalarField;

/// Amount one stroke moves a sample
pub const BRUSH_STEP: f32 = 0.01;

/// What a stroke touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushReport {
    /// Clamped box of grid points considered
    pub region: GridRegion,
    /// Grid points inside the sphere
    pub visited: usize,
    /// Grid points whose value changed
    pub modified: usize,
}

impl BrushReport {
    pub fn is_noop(&self) -> bool {
        self.modified == 0
    }
}

/// Nudge every sample within `stroke.radius` of the center by [`BRUSH_STEP`].
///
/// A sample only moves while it is on the near side of a linear falloff:
/// adding requires `value < radius / 2 - distance`, removing requires
/// `value > distance - radius / 2`. Results are clamped to [0, 1], and a
/// sample already above 1 (add) or below 0 (remove) is not moved, so an add
/// never lowers a value and a remove never raises one. A stroke whose box
/// misses the field changes nothing.
///
/// Panics if `field` does not hold `size + 1` samples per axis.
pub fn apply_brush(field: &mut ScalarField, size: UVec3, stroke: &BrushStroke) -> BrushReport {
    assert_eq!(
        field.dims(),
        size + UVec3::ONE,
        "field extent does not match terrain size {size}"
    );

    let region = stroke.grid_region(size);
    let half_radius = stroke.radius / 2.0;
    let mut visited = 0;
    let mut modified = 0;

    for p in region.iter() {
        let distance = p.as_vec3().distance(stroke.center);
        if distance > stroke.radius {
            continue;
        }
        visited += 1;

        let value = field.get_mut(p);
        let next = match stroke.mode {
            // Samples already past the clamp bound are left alone
            BrushMode::Add if *value < 1.0 && *value < half_radius - distance => {
                (*value + BRUSH_STEP).clamp(0.0, 1.0)
            }
            BrushMode::Remove if *value > 0.0 && *value > distance - half_radius => {
                (*value - BRUSH_STEP).clamp(0.0, 1.0)
            }
            _ => continue,
        };
        if next != *value {
            *value = next;
            modified += 1;
        }
    }

    log::trace!(
        "{:?} brush at {} (r={}): visited {}, modified {}",
        stroke.mode,
        stroke.center,
        stroke.radius,
        visited,
        modified,
    );

    BrushReport { region, visited, modified }
}
