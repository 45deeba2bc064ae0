//! Procedural terrain generation and the editable terrain instance

pub mod noise;
pub mod config;
pub mod generator;
pub mod voxel_terrain;

pub use config::{GeneratorKind, TerrainConfig, TerrainParams};
pub use generator::TerrainGenerator;
pub use noise::NoiseSampler;
pub use voxel_terrain::VoxelTerrain;
