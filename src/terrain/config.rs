//! Terrain parameters and their JSON configuration file

use std::path::Path;

use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::mesh::MeshSettings;

/// Procedural rule used to fill the scalar field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratorKind {
    /// Symmetrized 3D Perlin noise
    #[default]
    Perlin3D,
    /// Noise heightmap with a one-unit transition band
    Flat,
    /// Three-octave rolling hills falling off with height
    Landscape,
}

impl std::str::FromStr for GeneratorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "perlin3d" | "perlin" => Ok(GeneratorKind::Perlin3D),
            "flat" => Ok(GeneratorKind::Flat),
            "landscape" => Ok(GeneratorKind::Landscape),
            other => Err(Error::invalid_parameter(
                "generator",
                format!("unknown generator `{other}` (expected perlin3d, flat or landscape)"),
            )),
        }
    }
}

/// Parameters shared by the generator and the mesher for one build
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub generator: GeneratorKind,
    pub seed: u32,
    /// Coordinate divisor for 3D noise (below 0.001 means unscaled)
    pub scale: f32,
    /// Shift applied to noise coordinates after scaling
    pub offset: Vec3,
    /// Amplitude of the first landscape octave
    pub amplitude: f32,
    /// Horizontal frequency of the flat and landscape height noise
    pub frequency: f32,
    /// Optional contrast stretch applied to 3D noise
    pub contrast: Option<f32>,
    /// Surface threshold in [0, 1]
    pub surface: f32,
    /// Force boundary samples to `f32::MIN` so the surface closes
    pub solid_edges: bool,
    /// Interpolate edge crossings instead of using midpoints
    pub smooth_terrain: bool,
    /// Weld shared vertices
    pub smooth_shading: bool,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::Perlin3D,
            seed: 0,
            scale: 7.0,
            offset: Vec3::ZERO,
            amplitude: 1.0,
            frequency: 1.5 / 16.0,
            contrast: None,
            surface: 0.5,
            solid_edges: true,
            smooth_terrain: true,
            smooth_shading: false,
        }
    }
}

impl TerrainParams {
    /// Settings the mesher reads from these parameters
    pub fn mesh_settings(&self) -> MeshSettings {
        MeshSettings {
            surface: self.surface,
            smooth_terrain: self.smooth_terrain,
            smooth_shading: self.smooth_shading,
        }
    }

    /// Reject parameters that would produce non-finite samples or an
    /// out-of-range threshold
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.surface) {
            return Err(Error::invalid_parameter(
                "surface",
                format!("must lie in [0, 1], got {}", self.surface),
            ));
        }

        let finite = [
            ("scale", self.scale),
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(Error::invalid_parameter(name, format!("must be finite, got {value}")));
            }
        }
        if !self.offset.is_finite() {
            return Err(Error::invalid_parameter("offset", format!("must be finite, got {}", self.offset)));
        }
        if let Some(factor) = self.contrast {
            if !factor.is_finite() {
                return Err(Error::invalid_parameter("contrast", format!("must be finite, got {factor}")));
            }
        }
        Ok(())
    }
}

/// Reject sizes with an empty axis
pub fn validate_size(size: UVec3) -> Result<()> {
    if size.cmpeq(UVec3::ZERO).any() {
        return Err(Error::InvalidSize(size));
    }
    Ok(())
}

/// A terrain size together with its parameters, as stored on disk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Cubes per axis
    pub size: UVec3,
    #[serde(default)]
    pub params: TerrainParams,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size: UVec3::splat(16),
            params: TerrainParams::default(),
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<()> {
        validate_size(self.size)?;
        self.params.validate()
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::debug!("Loaded terrain config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Save as pretty JSON, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}
