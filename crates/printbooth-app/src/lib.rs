#![warn(missing_docs)]
//! # printbooth-app
//!
//! ## Purpose
//! Orchestrates decode, layout, composition, and output handling for
//! `printbooth`.
//!
//! ## Responsibilities
//! - Decode all photo payloads concurrently with an all-or-nothing join.
//! - Drive the grid/strip compositors from caller-supplied parameters.
//! - Read runtime configuration from environment variables with documented
//!   defaults.
//! - Derive the composite idempotency digest consumed by caching callers.
//!
//! ## Data flow
//! Encoded photo payloads + grid descriptor -> [`decode_photos`] ->
//! [`compose_print`] -> [`CompositeImage`] -> caller storage / preview via
//! [`strip_preview`].
//!
//! ## Ownership and lifetimes
//! Payloads are borrowed only for the duration of the decode join; all
//! outputs own their buffers so callers keep no coupling to the inputs.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`]; a decode failure names the
//! offending payload index and aborts the whole composite.

use printbooth_compose::{
    compose_grid, extract_left_strip, ComposeError, ComposeOptions, CompositeImage,
    DEFAULT_DPI, DEFAULT_JPEG_QUALITY, DEFAULT_MARGIN_PERCENT,
};
use printbooth_core::{Bitmap, CoreError, GridDescriptor};
use printbooth_layout::grid_for_id;
use printbooth_raster::{Rasterizer, RasterError};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("PRINTBOOTH_VERSION");

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Decodes all photo payloads concurrently and joins the results.
///
/// # Semantics
/// Each payload decodes on its own scoped thread; every result is joined
/// before compositing starts, and the first failure by input index aborts the
/// whole operation. Completion order never influences the outcome.
///
/// # Errors
/// Returns [`AppError::PhotoDecode`] naming the failing payload index.
pub fn decode_photos(
    rasterizer: &dyn Rasterizer,
    payloads: &[Vec<u8>],
) -> Result<Vec<Bitmap>, AppError> {
    let results: Vec<Result<Bitmap, RasterError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = payloads
            .iter()
            .map(|payload| scope.spawn(move || rasterizer.decode(payload)))
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(RasterError::Decode("decode worker panicked".to_string())))
            })
            .collect()
    });

    let mut photos = Vec::with_capacity(results.len());
    for (index, result) in results.into_iter().enumerate() {
        photos.push(result.map_err(|source| AppError::PhotoDecode { index, source })?);
    }

    Ok(photos)
}

/// Composes one print from encoded photo payloads.
///
/// # Errors
/// Returns [`AppError::PhotoDecode`] when any payload fails to decode and
/// [`AppError::Compose`] for count/geometry/raster failures.
pub fn compose_print(
    rasterizer: &dyn Rasterizer,
    payloads: &[Vec<u8>],
    grid: &GridDescriptor,
    options: &ComposeOptions,
) -> Result<CompositeImage, AppError> {
    let photos = decode_photos(rasterizer, payloads)?;
    compose_grid(rasterizer, &photos, grid, options).map_err(AppError::Compose)
}

/// Extracts the left 2x6in strip from a duplicated-strip composite for the
/// UI preview pane.
///
/// # Errors
/// Returns [`AppError::Compose`] when the composite is not decodable or is
/// smaller than the strip region.
pub fn strip_preview(
    rasterizer: &dyn Rasterizer,
    composite_bytes: &[u8],
    dpi: u32,
    jpeg_quality: u8,
) -> Result<CompositeImage, AppError> {
    extract_left_strip(rasterizer, composite_bytes, dpi, jpeg_quality).map_err(AppError::Compose)
}

/// Returns the hex-encoded SHA-256 of the encoded composite bytes.
///
/// Identical inputs produce identical composites, so this digest doubles as
/// an idempotency/caching key.
pub fn composite_digest(composite: &CompositeImage) -> String {
    hex::encode(Sha256::digest(&composite.bytes))
}

/// Resolves the CLI grid argument into a canonical descriptor.
///
/// # Semantics
/// Arguments ending in `.json` are read as a grid descriptor file; everything
/// else is looked up in the layout catalog by canonical or legacy id.
///
/// # Errors
/// Returns [`AppError::UnknownLayout`] for uncataloged ids, [`AppError::Io`]
/// for unreadable files, and [`AppError::Core`] for invalid descriptor JSON.
pub fn resolve_grid_argument(argument: &str) -> Result<GridDescriptor, AppError> {
    if argument.ends_with(".json") {
        let raw = std::fs::read(argument)?;
        return GridDescriptor::from_json_bytes(&raw).map_err(AppError::Core);
    }

    grid_for_id(argument).ok_or_else(|| AppError::UnknownLayout(argument.to_string()))
}

/// Reads the print resolution from `PRINTBOOTH_DPI`.
///
/// Unset or unparsable values fall back to the default of 300.
pub fn dpi_from_env() -> u32 {
    std::env::var("PRINTBOOTH_DPI")
        .ok()
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|dpi| *dpi > 0)
        .unwrap_or(DEFAULT_DPI)
}

/// Reads the cell margin percentage from `PRINTBOOTH_MARGIN_PERCENT`.
///
/// Unset, unparsable, or negative values fall back to the default of 2.
pub fn margin_percent_from_env() -> f64 {
    std::env::var("PRINTBOOTH_MARGIN_PERCENT")
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|percent| *percent >= 0.0)
        .unwrap_or(DEFAULT_MARGIN_PERCENT)
}

/// Reads the JPEG encode quality from `PRINTBOOTH_JPEG_QUALITY`.
///
/// Values outside 1-100 fall back to the default of 95.
pub fn jpeg_quality_from_env() -> u8 {
    std::env::var("PRINTBOOTH_JPEG_QUALITY")
        .ok()
        .and_then(|value| value.trim().parse::<u8>().ok())
        .filter(|quality| (1..=100).contains(quality))
        .unwrap_or(DEFAULT_JPEG_QUALITY)
}

/// Assembles compose options from the environment.
pub fn compose_options_from_env() -> ComposeOptions {
    ComposeOptions {
        dpi: dpi_from_env(),
        margin_percent: margin_percent_from_env(),
        max_cell_width_inches: None,
        jpeg_quality: jpeg_quality_from_env(),
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// One photo payload failed to decode.
    #[error("photo {index} failed to decode: {source}")]
    PhotoDecode {
        /// Zero-based index of the failing payload.
        index: usize,
        /// Underlying decode failure.
        source: RasterError,
    },
    /// Composite assembly failure.
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),
    /// Core model failure.
    #[error("core error: {0}")]
    Core(CoreError),
    /// Grid argument does not match any cataloged layout.
    #[error("unknown layout id: {0}")]
    UnknownLayout(String),
    /// Filesystem failure while reading inputs or writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
