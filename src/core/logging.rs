//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g.
/// `RUST_LOG=marching_terrain=debug` to see per-build mesh statistics.
///
/// # Example
/// ```no_run
/// marching_terrain::core::logging::init();
/// log::info!("Terrain tool started");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .format_timestamp_millis()
    .init();
}
