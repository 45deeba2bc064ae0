//! Terrain generator binary: builds a terrain, applies brush strokes and
//! writes the resulting mesh as Wavefront OBJ.
//!
//! Usage: cargo run --release --bin generate_terrain -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>     JSON terrain config (size + params) to start from
//!   --save-config <P>   Write the effective config as JSON
//!   --size <X,Y,Z>      Cubes per axis (default: 32,16,32)
//!   --seed <SEED>       Noise seed (default: 0)
//!   --kind <KIND>       perlin3d, flat or landscape (default: perlin3d)
//!   --surface <S>       Surface threshold in [0, 1] (default: 0.5)
//!   --brush <X,Y,Z,R>   Add stroke; repeatable
//!   --carve <X,Y,Z,R>   Remove stroke; repeatable
//!   --repeat <N>        Times each stroke is applied (default: 1)
//!   --weld              Weld shared vertices
//!   --out <PATH>        Output OBJ path (default: terrain.obj)

use std::path::PathBuf;
use std::time::Instant;

use glam::{UVec3, Vec3};

use marching_terrain::core::{logging, Result};
use marching_terrain::terrain::{TerrainConfig, VoxelTerrain};
use marching_terrain::voxel::{BrushSession, BrushStroke};

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let mut config = match parse_str_arg(args, "--config") {
        Some(path) => TerrainConfig::load(path)?,
        None => TerrainConfig {
            size: UVec3::new(32, 16, 32),
            ..Default::default()
        },
    };

    if let Some(size) = parse_list_arg::<u32, 3>(args, "--size") {
        config.size = UVec3::from_array(size);
    }
    if let Some(seed) = parse_u32_arg(args, "--seed") {
        config.params.seed = seed;
    }
    if let Some(kind) = parse_str_arg(args, "--kind") {
        config.params.generator = kind.parse()?;
    }
    if let Some(surface) = parse_f32_arg(args, "--surface") {
        config.params.surface = surface;
    }
    if args.iter().any(|a| a == "--weld") {
        config.params.smooth_shading = true;
    }
    config.validate()?;

    let repeat = parse_u32_arg(args, "--repeat").unwrap_or(1);
    let output = PathBuf::from(parse_str_arg(args, "--out").unwrap_or_else(|| "terrain.obj".to_string()));

    let mut session = BrushSession::new();
    for _ in 0..repeat {
        for [x, y, z, r] in parse_repeated_list::<f32, 4>(args, "--brush") {
            session.add_stroke(BrushStroke::add(Vec3::new(x, y, z), r));
        }
        for [x, y, z, r] in parse_repeated_list::<f32, 4>(args, "--carve") {
            session.add_stroke(BrushStroke::remove(Vec3::new(x, y, z), r));
        }
    }

    println!("=== Marching Terrain Generator ===");
    println!("Size:      {} x {} x {}", config.size.x, config.size.y, config.size.z);
    println!("Generator: {:?}", config.params.generator);
    println!("Seed:      {}", config.params.seed);
    println!("Surface:   {}", config.params.surface);
    println!("Strokes:   {}", session.len());
    println!("Output:    {}", output.display());
    println!();

    let start = Instant::now();
    let mut terrain = VoxelTerrain::from_config(&config)?;
    log::info!("Generated and meshed in {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

    if !session.is_empty() {
        let start = Instant::now();
        let reports = terrain.apply_session(&session)?;
        let modified: usize = reports.iter().map(|r| r.modified).sum();
        log::info!(
            "Applied {} strokes ({} sample updates) in {:.2}ms",
            reports.len(),
            modified,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    if let Some(path) = parse_str_arg(args, "--save-config") {
        config.save(&path)?;
        println!("Saved config to {}", path);
    }

    let mesh = terrain.mesh();
    if let Some(bounds) = mesh.bounds() {
        log::info!("Mesh extent {} .. {}", bounds.min, bounds.max);
    }
    mesh.save_obj(&output)?;
    println!(
        "Wrote {} vertices, {} triangles to {}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        output.display()
    );
    Ok(())
}

fn print_help() {
    eprintln!("generate_terrain - Marching cubes terrain export");
    eprintln!();
    eprintln!("Usage: generate_terrain [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    --config <PATH>       JSON terrain config to start from");
    eprintln!("    --save-config <PATH>  Write the effective config as JSON");
    eprintln!("    --size <X,Y,Z>        Cubes per axis (default: 32,16,32)");
    eprintln!("    --seed <SEED>         Noise seed (default: 0)");
    eprintln!("    --kind <KIND>         perlin3d, flat or landscape");
    eprintln!("    --surface <S>         Surface threshold in [0, 1] (default: 0.5)");
    eprintln!("    --brush <X,Y,Z,R>     Add stroke (repeatable)");
    eprintln!("    --carve <X,Y,Z,R>     Remove stroke (repeatable)");
    eprintln!("    --repeat <N>          Times each stroke is applied (default: 1)");
    eprintln!("    --weld                Weld shared vertices");
    eprintln!("    --out <PATH>          Output OBJ path (default: terrain.obj)");
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    parse_arg(args, flag, |s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    parse_arg(args, flag, |s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Value following `flag`, warning when it is present but malformed
fn parse_arg<T>(args: &[String], flag: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    let raw = parse_str_arg(args, flag)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        log::warn!("Ignoring malformed {} value `{}`", flag, raw);
    }
    parsed
}

/// Parse a comma-separated value list of exactly `N` entries
fn parse_list<T: std::str::FromStr + Copy + Default, const N: usize>(s: &str) -> Option<[T; N]> {
    let mut out = [T::default(); N];
    let mut parts = s.split(',');
    for slot in out.iter_mut() {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    parts.next().is_none().then_some(out)
}

fn parse_list_arg<T: std::str::FromStr + Copy + Default, const N: usize>(args: &[String], flag: &str) -> Option<[T; N]> {
    parse_arg(args, flag, parse_list::<T, N>)
}

/// Every occurrence of `flag`, skipping malformed values with a warning
fn parse_repeated_list<T: std::str::FromStr + Copy + Default, const N: usize>(args: &[String], flag: &str) -> Vec<[T; N]> {
    args.windows(2)
        .filter(|w| w[0] == flag)
        .filter_map(|w| {
            let parsed = parse_list(&w[1]);
            if parsed.is_none() {
                log::warn!("Ignoring malformed {} value `{}`", flag, w[1]);
            }
            parsed
        })
        .collect()
}
