#![warn(missing_docs)]
//! # printbooth-app binary
//!
//! Command-line entry point: composes photo files into one print-ready page.

use std::time::Instant;

use log::info;
use printbooth_app::{
    app_version, compose_options_from_env, compose_print, composite_digest,
    resolve_grid_argument, AppError,
};
use printbooth_raster::ImageRasterizer;

/// CLI entry point.
fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("printbooth {}", app_version());
        eprintln!("usage: printbooth <grid-id|grid.json> <output.jpg> <photo>...");
        eprintln!(
            "env: PRINTBOOTH_DPI, PRINTBOOTH_MARGIN_PERCENT, PRINTBOOTH_JPEG_QUALITY"
        );
        std::process::exit(2);
    }

    if let Err(error) = run(&args) {
        eprintln!("composite failed: {error}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), AppError> {
    let grid = resolve_grid_argument(&args[0])?;
    let output_path = &args[1];

    let mut payloads = Vec::with_capacity(args.len() - 2);
    for path in &args[2..] {
        payloads.push(std::fs::read(path)?);
    }

    let options = compose_options_from_env();
    let rasterizer = ImageRasterizer::new();

    let started = Instant::now();
    let composite = compose_print(&rasterizer, &payloads, &grid, &options)?;
    info!(
        "composed {} photos onto {} in {}ms",
        payloads.len(),
        grid.id,
        started.elapsed().as_millis()
    );

    std::fs::write(output_path, &composite.bytes)?;
    println!(
        "wrote {output_path} ({}x{} px, {} bytes, sha256 {})",
        composite.width,
        composite.height,
        composite.bytes.len(),
        composite_digest(&composite)
    );

    Ok(())
}
