//! A single editable terrain: field, parameters and the mesh built from them
//!
//! Every mutation runs the whole pipeline synchronously. Regeneration refills
//! the field, brushing edits it in place, and both end in a full remesh that
//! is pushed to the installed [`GeometrySink`], if any.

use std::fmt;

use glam::UVec3;

use super::config::{validate_size, TerrainConfig, TerrainParams};
use super::generator::TerrainGenerator;
use crate::core::{Error, Result};
use crate::mesh::{GeometrySink, MeshData, Mesher};
use crate::voxel::{apply_brush, BrushReport, BrushSession, BrushStroke, ScalarField};

pub struct VoxelTerrain {
    size: UVec3,
    params: TerrainParams,
    field: ScalarField,
    mesh: MeshData,
    sink: Option<Box<dyn GeometrySink>>,
}

impl VoxelTerrain {
    /// Generate and mesh a terrain of `size` cubes per axis
    pub fn new(size: UVec3, params: TerrainParams) -> Result<Self> {
        validate_size(size)?;
        params.validate()?;

        let field = TerrainGenerator::new(params.clone()).generate(size);
        let mut terrain = Self {
            size,
            params,
            field,
            mesh: MeshData::new(),
            sink: None,
        };
        terrain.remesh();
        log::info!(
            "Created {}x{}x{} terrain: {} triangles",
            size.x,
            size.y,
            size.z,
            terrain.mesh.triangle_count()
        );
        Ok(terrain)
    }

    pub fn from_config(config: &TerrainConfig) -> Result<Self> {
        Self::new(config.size, config.params.clone())
    }

    /// Wrap an existing field, which must hold only finite samples
    /// (`f32::MIN` included)
    pub fn from_field(field: ScalarField, params: TerrainParams) -> Result<Self> {
        params.validate()?;
        let size = field.cube_count();
        validate_size(size)?;
        field.validate()?;

        let mut terrain = Self {
            size,
            params,
            field,
            mesh: MeshData::new(),
            sink: None,
        };
        terrain.remesh();
        Ok(terrain)
    }

    pub fn size(&self) -> UVec3 {
        self.size
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Install a consumer that receives the buffers after every remesh.
    ///
    /// The current mesh is pushed immediately.
    pub fn set_sink(&mut self, sink: impl GeometrySink + 'static) {
        let mut sink: Box<dyn GeometrySink> = Box::new(sink);
        sink.set_geometry(&self.mesh.vertices, &self.mesh.triangles);
        self.sink = Some(sink);
    }

    /// Remove the installed consumer, if any
    pub fn clear_sink(&mut self) -> Option<Box<dyn GeometrySink>> {
        self.sink.take()
    }

    /// Hand the current buffers to `sink` once
    pub fn publish(&self, sink: &mut dyn GeometrySink) {
        sink.set_geometry(&self.mesh.vertices, &self.mesh.triangles);
    }

    /// Refill the field from the current parameters and remesh
    pub fn regenerate(&mut self) {
        TerrainGenerator::new(self.params.clone()).fill(&mut self.field);
        self.remesh();
    }

    /// Replace the parameters and regenerate; on error nothing changes
    pub fn set_params(&mut self, params: TerrainParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        self.regenerate();
        Ok(())
    }

    /// Resize the grid and regenerate; on error nothing changes
    pub fn set_size(&mut self, size: UVec3) -> Result<()> {
        validate_size(size)?;
        self.size = size;
        self.field = ScalarField::new(size);
        self.regenerate();
        Ok(())
    }

    /// Rebuild the mesh from the field and notify the sink
    pub fn remesh(&mut self) {
        let mesher = Mesher::new(self.params.mesh_settings());
        mesher.build_into(&self.field, self.size, &mut self.mesh);
        if let Some(sink) = self.sink.as_mut() {
            sink.set_geometry(&self.mesh.vertices, &self.mesh.triangles);
        }
    }

    /// Apply one stroke, then remesh the whole terrain
    pub fn apply_brush(&mut self, stroke: &BrushStroke) -> Result<BrushReport> {
        check_stroke(stroke)?;
        let report = apply_brush(&mut self.field, self.size, stroke);
        self.remesh();
        Ok(report)
    }

    /// Apply every stroke of `session` in order with a single remesh at the end
    pub fn apply_session(&mut self, session: &BrushSession) -> Result<Vec<BrushReport>> {
        for stroke in session.strokes() {
            check_stroke(stroke)?;
        }
        let reports = session.apply(&mut self.field, self.size);
        self.remesh();

        let modified: usize = reports.iter().map(|r| r.modified).sum();
        log::debug!("Applied {} strokes, {} samples modified", reports.len(), modified);
        Ok(reports)
    }
}

impl fmt::Debug for VoxelTerrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoxelTerrain")
            .field("size", &self.size)
            .field("params", &self.params)
            .field("vertices", &self.mesh.vertex_count())
            .field("triangles", &self.mesh.triangle_count())
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

fn check_stroke(stroke: &BrushStroke) -> Result<()> {
    if !stroke.center.is_finite() {
        return Err(Error::invalid_parameter("center", format!("must be finite, got {}", stroke.center)));
    }
    if !stroke.radius.is_finite() {
        return Err(Error::invalid_parameter("radius", format!("must be finite, got {}", stroke.radius)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;

    use super::*;
    use crate::terrain::GeneratorKind;
    use crate::voxel::BrushMode;

    fn small_params() -> TerrainParams {
        TerrainParams {
            seed: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_builds_mesh() {
        let terrain = VoxelTerrain::new(UVec3::splat(10), small_params()).unwrap();
        assert_eq!(terrain.field().dims(), UVec3::splat(11));
        assert!(!terrain.mesh().is_empty());
        assert!(terrain.mesh().validate().is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_input() {
        assert!(matches!(
            VoxelTerrain::new(UVec3::new(4, 0, 4), small_params()),
            Err(Error::InvalidSize(_))
        ));

        let params = TerrainParams { surface: -0.1, ..Default::default() };
        assert!(matches!(
            VoxelTerrain::new(UVec3::splat(4), params),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_from_field() {
        let size = UVec3::new(3, 4, 2);
        let field = ScalarField::from_fn(size, |p| if p.y == 2 { 0.5 } else { 0.0 });
        let terrain = VoxelTerrain::from_field(field, TerrainParams::default()).unwrap();
        assert_eq!(terrain.size(), size);
        assert_eq!(terrain.mesh().triangle_count(), 24);

        let mut bad = ScalarField::new(size);
        bad.set(UVec3::ONE, f32::NAN);
        assert!(matches!(
            VoxelTerrain::from_field(bad, TerrainParams::default()),
            Err(Error::Field(_))
        ));
    }

    #[test]
    fn test_uniform_fields_have_no_geometry() {
        let size = UVec3::splat(4);
        for value in [0.0, 1.0] {
            let terrain = VoxelTerrain::from_field(ScalarField::filled(size, value), TerrainParams::default()).unwrap();
            assert!(terrain.mesh().is_empty());
        }
    }

    #[test]
    fn test_sink_receives_every_remesh() {
        let calls: Rc<RefCell<Vec<(usize, usize)>>> = Rc::default();
        let mut terrain = VoxelTerrain::new(UVec3::splat(8), small_params()).unwrap();

        let seen = Rc::clone(&calls);
        terrain.set_sink(move |v: &[Vec3], t: &[u32]| seen.borrow_mut().push((v.len(), t.len())));
        assert_eq!(calls.borrow().len(), 1);

        terrain.apply_brush(&BrushStroke::add(Vec3::splat(4.0), 3.0)).unwrap();
        terrain.regenerate();
        assert_eq!(calls.borrow().len(), 3);

        let last = *calls.borrow().last().unwrap();
        assert_eq!(last, (terrain.mesh().vertex_count(), terrain.mesh().triangles.len()));

        assert!(terrain.clear_sink().is_some());
        terrain.remesh();
        assert_eq!(calls.borrow().len(), 3);
    }

    #[test]
    fn test_publish_copies_mesh() {
        let terrain = VoxelTerrain::new(UVec3::splat(6), small_params()).unwrap();
        let mut copy = MeshData::new();
        terrain.publish(&mut copy);
        assert_eq!(&copy, terrain.mesh());
    }

    #[test]
    fn test_brush_edits_field_and_mesh() {
        let size = UVec3::splat(8);
        let mut terrain = VoxelTerrain::from_field(ScalarField::new(size), TerrainParams::default()).unwrap();
        assert!(terrain.mesh().is_empty());

        let mut session = BrushSession::new();
        for _ in 0..60 {
            session.sphere(Vec3::splat(4.0), 3.0);
        }
        let reports = terrain.apply_session(&session).unwrap();
        assert_eq!(reports.len(), 60);
        assert!(terrain.field().get(UVec3::splat(4)) > 0.5);
        assert!(!terrain.mesh().is_empty());

        let mut carve = BrushSession::new();
        carve.set_mode(BrushMode::Remove);
        for _ in 0..60 {
            carve.sphere(Vec3::splat(4.0), 3.0);
        }
        terrain.apply_session(&carve).unwrap();
        assert!(terrain.field().get(UVec3::splat(4)) < 0.5);
    }

    #[test]
    fn test_brush_outside_is_noop() {
        let mut terrain = VoxelTerrain::new(UVec3::splat(6), small_params()).unwrap();
        let before = terrain.mesh().clone();
        let report = terrain.apply_brush(&BrushStroke::remove(Vec3::splat(100.0), 2.0)).unwrap();
        assert!(report.is_noop());
        assert_eq!(terrain.mesh(), &before);
    }

    #[test]
    fn test_brush_rejects_non_finite_stroke() {
        let mut terrain = VoxelTerrain::new(UVec3::splat(4), small_params()).unwrap();
        let field = terrain.field().clone();
        assert!(terrain.apply_brush(&BrushStroke::add(Vec3::new(f32::NAN, 1.0, 1.0), 1.0)).is_err());

        let mut session = BrushSession::new();
        session.sphere(Vec3::ONE, 1.0).sphere(Vec3::ONE, f32::INFINITY);
        assert!(terrain.apply_session(&session).is_err());
        assert_eq!(terrain.field(), &field);
    }

    #[test]
    fn test_set_params_and_size() {
        let mut terrain = VoxelTerrain::new(UVec3::splat(6), small_params()).unwrap();

        let flat = TerrainParams {
            generator: GeneratorKind::Flat,
            ..small_params()
        };
        terrain.set_params(flat.clone()).unwrap();
        assert_eq!(terrain.params(), &flat);

        let bad = TerrainParams { surface: 2.0, ..Default::default() };
        assert!(terrain.set_params(bad).is_err());
        assert_eq!(terrain.params(), &flat);

        terrain.set_size(UVec3::new(10, 6, 4)).unwrap();
        assert_eq!(terrain.field().dims(), UVec3::new(11, 7, 5));
        assert!(terrain.mesh().validate().is_ok());

        assert!(terrain.set_size(UVec3::new(0, 6, 4)).is_err());
        assert_eq!(terrain.size(), UVec3::new(10, 6, 4));
    }

    #[test]
    fn test_regenerate_discards_edits() {
        let mut terrain = VoxelTerrain::new(UVec3::splat(6), small_params()).unwrap();
        let original = terrain.field().clone();
        terrain.apply_brush(&BrushStroke::add(Vec3::splat(3.0), 3.0)).unwrap();
        assert_ne!(terrain.field(), &original);

        terrain.regenerate();
        assert_eq!(terrain.field(), &original);
    }
}
