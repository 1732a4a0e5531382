use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::process;

use urban_extract::cli::{Args, Mode};
use urban_extract::error::Result;
use urban_extract::{buffered_patch_extract, io, trimmed_boundary_extract};

fn run(args: &Args) -> Result<()> {
    let config = args.extract_config()?;

    let raster = io::read_input_raster(&args.input)?;
    let (rows, cols) = raster.shape();
    info!("Raster size: {}x{}", cols, rows);

    let boundary = io::read_boundary_mask(&args.boundary, raster.shape())?;

    let extract = match args.mode {
        Mode::Trimmed => trimmed_boundary_extract(&raster, boundary.view(), &config)?,
        Mode::Buffered => buffered_patch_extract(&raster, boundary.view(), &config, &args.buffer_options())?,
    };
    info!("Source encoding: {:?}", extract.codec);

    io::write_extract(&args.output, &extract, &args.compress)
}

fn main() {
    let args = Args::parse();

    // Initialize logger
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("=== Urban Extract ===");

    // Set thread pool size if specified
    if let Some(n_threads) = args.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n_threads).build_global() {
            error!("Failed to build thread pool: {}", e);
            process::exit(1);
        }
        info!("Using {} threads", n_threads);
    } else {
        info!("Using all available threads");
    }

    if let Err(e) = run(&args) {
        error!("Extraction failed: {}", e);
        process::exit(1);
    }

    info!("=== Done! ===");
}
