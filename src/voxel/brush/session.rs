//! Brush session for collecting strokes

use glam::{UVec3, Vec3};

use super::apply::{apply_brush, BrushReport};
use super::stroke::{BrushMode, BrushStroke};
use crate::voxel::ScalarField;

/// A session for collecting brush strokes before applying them in one pass
#[derive(Debug, Clone, Default)]
pub struct BrushSession {
    /// All strokes in this session
    strokes: Vec<BrushStroke>,
    /// Mode for new strokes
    current_mode: BrushMode,
}

impl BrushSession {
    /// Create a new empty brush session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create session with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            strokes: Vec::with_capacity(capacity),
            current_mode: BrushMode::Add,
        }
    }

    /// Set the mode for subsequent strokes
    pub fn set_mode(&mut self, mode: BrushMode) -> &mut Self {
        self.current_mode = mode;
        self
    }

    pub fn mode(&self) -> BrushMode {
        self.current_mode
    }

    /// Add a sphere stroke in the current mode
    pub fn sphere(&mut self, center: Vec3, radius: f32) -> &mut Self {
        self.strokes.push(BrushStroke::new(center, radius, self.current_mode));
        self
    }

    /// Add a pre-built stroke directly, keeping its own mode
    pub fn add_stroke(&mut self, stroke: BrushStroke) -> &mut Self {
        self.strokes.push(stroke);
        self
    }

    /// Get all strokes
    pub fn strokes(&self) -> &[BrushStroke] {
        &self.strokes
    }

    /// Consume session and return strokes
    pub fn into_strokes(self) -> Vec<BrushStroke> {
        self.strokes
    }

    /// Get number of strokes
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Check if session has no strokes
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Clear all strokes
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Apply every stroke in order, returning one report per stroke
    pub fn apply(&self, field: &mut ScalarField, size: UVec3) -> Vec<BrushReport> {
        self.strokes
            .iter()
            .map(|stroke| apply_brush(field, size, stroke))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = BrushSession::new();
        assert!(session.is_empty());
        assert_eq!(session.len(), 0);
        assert_eq!(session.mode(), BrushMode::Add);
    }

    #[test]
    fn test_fluent_api() {
        let mut session = BrushSession::with_capacity(4);
        session
            .sphere(Vec3::splat(2.0), 1.0)
            .set_mode(BrushMode::Remove)
            .sphere(Vec3::splat(3.0), 2.0)
            .add_stroke(BrushStroke::add(Vec3::ONE, 0.5));

        let modes: Vec<BrushMode> = session.strokes().iter().map(|s| s.mode).collect();
        assert_eq!(modes, vec![BrushMode::Add, BrushMode::Remove, BrushMode::Add]);
        assert_eq!(session.mode(), BrushMode::Remove);

        session.clear();
        assert!(session.is_empty());
    }

    #[test]
    fn test_apply_matches_sequential_strokes() {
        let size = UVec3::splat(6);
        let mut session = BrushSession::new();
        session
            .sphere(Vec3::splat(3.0), 2.5)
            .sphere(Vec3::new(2.0, 3.0, 3.0), 2.0)
            .set_mode(BrushMode::Remove)
            .sphere(Vec3::splat(3.0), 1.0);

        let mut batched = ScalarField::filled(size, 0.3);
        let reports = session.apply(&mut batched, size);
        assert_eq!(reports.len(), 3);

        let mut sequential = ScalarField::filled(size, 0.3);
        for stroke in session.strokes() {
            apply_brush(&mut sequential, size, stroke);
        }
        assert_eq!(batched, sequential);
    }

    #[test]
    fn test_into_strokes_keeps_order() {
        let mut session = BrushSession::new();
        session
            .sphere(Vec3::splat(2.0), 1.0)
            .sphere(Vec3::splat(-20.0), 1.0);

        let strokes = session.into_strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[1].center, Vec3::splat(-20.0));
    }
}
