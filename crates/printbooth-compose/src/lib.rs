#![warn(missing_docs)]
//! # printbooth-compose
//!
//! ## Purpose
//! Composes print-ready composite images from decoded photo sets: the general
//! N-cell grid compositor, the duplicated-strip compositor, and the left-strip
//! extraction helper.
//!
//! ## Responsibilities
//! - Validate the photo count and grid geometry for one composite request.
//! - Derive uniform cell pixel dimensions from the page size, margins, and
//!   photo aspect ratios.
//! - Rasterize each photo into its cell in deterministic column-major order.
//! - Build the 2x6in strip and duplicate it side-by-side onto a 4x6in page.
//!
//! ## Data flow
//! Decoded photo set + grid descriptor -> [`compose_grid`] (or
//! [`compose_strip`]) -> [`CompositeImage`] consumed by the caller.
//!
//! ## Ownership and lifetimes
//! Composite output owns its byte buffer; each invocation allocates its own
//! canvas and drops it after encoding. Source photos are only read.
//!
//! ## Error model
//! Wrong photo counts and degenerate grids fail before any decode or draw
//! work with [`ComposeError`]; rasterizer failures abort the whole composite
//! with no partial output.

use log::debug;
use printbooth_core::{Bitmap, GridDescriptor, STRIP_PHOTO_COUNT};
use printbooth_layout::{
    cell_position, fit_within, resolve_page_size, CellBox, PlacementResult, CELL_GAP_INCHES,
};
use printbooth_raster::{Rasterizer, RasterError};
use thiserror::Error;

/// Default print resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 300;

/// Default cell margin as a percentage of the smaller cell dimension.
pub const DEFAULT_MARGIN_PERCENT: f64 = 2.0;

/// Default JPEG encode quality for composite output.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Strip width in inches (half of the 4x6 page).
pub const STRIP_WIDTH_INCHES: f64 = 2.0;

/// Strip height in inches (full 4x6 page height).
pub const STRIP_HEIGHT_INCHES: f64 = 6.0;

/// Final strip page width in inches (two strips side by side).
const STRIP_PAGE_WIDTH_INCHES: f64 = 4.0;

/// Tunable parameters for one grid composite request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposeOptions {
    /// Print resolution in dots per inch.
    pub dpi: u32,
    /// Cell margin as a percentage of the smaller cell dimension.
    pub margin_percent: f64,
    /// Optional cap on the nominal cell width, in inches. Derived from the
    /// page size when absent.
    pub max_cell_width_inches: Option<f64>,
    /// JPEG encode quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            margin_percent: DEFAULT_MARGIN_PERCENT,
            max_cell_width_inches: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Encoded composite produced from one photo set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeImage {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// JPEG-encoded composite bytes.
    pub bytes: Vec<u8>,
}

/// Composes one photo set into an encoded print composite.
///
/// Routes to the duplicated-strip path when the descriptor carries the strip
/// flag; otherwise lays photos out in column-major vertical fill order on the
/// resolved page.
///
/// # Errors
/// Returns [`ComposeError::EmptyPhotoSet`], [`ComposeError::InvalidGridDimensions`]
/// or [`ComposeError::PhotoCountMismatch`] before any drawing starts, and
/// propagates rasterizer failures without partial output.
pub fn compose_grid(
    rasterizer: &dyn Rasterizer,
    photos: &[Bitmap],
    grid: &GridDescriptor,
    options: &ComposeOptions,
) -> Result<CompositeImage, ComposeError> {
    if grid.is_strip_grid {
        return compose_strip(rasterizer, photos, options.dpi, options.jpeg_quality);
    }

    let canvas = compose_grid_canvas(rasterizer, photos, grid, options)?;
    encode_canvas(rasterizer, canvas, options.jpeg_quality)
}

/// Composes the grid layout and returns the pre-encode canvas.
///
/// Exposed separately so pixel-exact properties can be asserted without a
/// lossy encode round trip.
///
/// # Errors
/// Same failure modes as [`compose_grid`].
pub fn compose_grid_canvas(
    rasterizer: &dyn Rasterizer,
    photos: &[Bitmap],
    grid: &GridDescriptor,
    options: &ComposeOptions,
) -> Result<Bitmap, ComposeError> {
    validate_photo_set(photos, grid)?;

    let page = resolve_page_size(Some(grid));
    let cols = grid.cols;
    let rows = grid.rows;

    let available_width = page.width_inches - CELL_GAP_INCHES * (cols - 1) as f64;
    let available_height = page.height_inches - CELL_GAP_INCHES * (rows - 1) as f64;
    let nominal_width = available_width / cols as f64;
    let nominal_height = available_height / rows as f64;
    let max_cell_width = options
        .max_cell_width_inches
        .unwrap_or_else(|| nominal_width.min(nominal_height));

    // Uniform cell: per-axis maximum of the nominal cell, the cap baseline,
    // and what each photo needs to fit at contain scale without cropping.
    // Extreme aspect ratios may grow the cell, and with it the canvas.
    let mut cell_width_inches = nominal_width.max(max_cell_width);
    let mut cell_height_inches = nominal_height.max(max_cell_width);
    for photo in photos {
        let aspect = photo.aspect_ratio();
        if aspect > 1.0 {
            cell_height_inches = cell_height_inches.max(max_cell_width / aspect);
        } else {
            cell_width_inches = cell_width_inches.max(max_cell_width * aspect);
        }
    }

    let dpi = options.dpi as f64;
    let cell_width = (cell_width_inches * dpi).round() as u32;
    let cell_height = (cell_height_inches * dpi).round() as u32;
    let margin = (cell_width.min(cell_height) as f64 * options.margin_percent / 100.0).round()
        as u32;

    let canvas_width = margin + (cell_width + margin) * cols;
    let canvas_height = margin + (cell_height + margin) * rows;
    debug!(
        "grid composite: page={} cell={}x{}px margin={}px canvas={}x{}px",
        page.label, cell_width, cell_height, margin, canvas_width, canvas_height
    );

    let mut canvas = rasterizer.new_canvas(canvas_width, canvas_height)?;
    for (index, photo) in photos.iter().enumerate() {
        let (col, row) = cell_position(index, rows);
        let cell = CellBox {
            x: margin + col * (cell_width + margin),
            y: margin + row * (cell_height + margin),
            width: cell_width,
            height: cell_height,
        };
        let placement = fit_within(photo.aspect_ratio(), cell);
        rasterizer.draw_bitmap(&mut canvas, photo, &placement)?;
    }

    Ok(canvas)
}

/// Composes exactly four photos into the duplicated 4x6in strip page.
///
/// Builds one 2x6in strip with the photos stacked in index order, then blits
/// the strip twice side by side.
///
/// # Errors
/// Returns [`ComposeError::PhotoCountMismatch`] unless exactly four photos
/// are supplied; rasterizer failures propagate without partial output.
pub fn compose_strip(
    rasterizer: &dyn Rasterizer,
    photos: &[Bitmap],
    dpi: u32,
    jpeg_quality: u8,
) -> Result<CompositeImage, ComposeError> {
    let canvas = compose_strip_canvas(rasterizer, photos, dpi)?;
    encode_canvas(rasterizer, canvas, jpeg_quality)
}

/// Composes the duplicated strip and returns the pre-encode canvas.
///
/// # Errors
/// Same failure modes as [`compose_strip`].
pub fn compose_strip_canvas(
    rasterizer: &dyn Rasterizer,
    photos: &[Bitmap],
    dpi: u32,
) -> Result<Bitmap, ComposeError> {
    if photos.len() != STRIP_PHOTO_COUNT {
        return Err(ComposeError::PhotoCountMismatch {
            expected: STRIP_PHOTO_COUNT,
            actual: photos.len(),
        });
    }

    let dpi = dpi as f64;
    let strip_width = (STRIP_WIDTH_INCHES * dpi).round() as u32;
    let strip_height = (STRIP_HEIGHT_INCHES * dpi).round() as u32;
    let cell_height = strip_height / STRIP_PHOTO_COUNT as u32;

    let mut strip = rasterizer.new_canvas(strip_width, strip_height)?;
    for (index, photo) in photos.iter().enumerate() {
        // Sequential order, not column-major: slot i is the i-th cell from
        // the top of the single column.
        let cell = CellBox {
            x: 0,
            y: index as u32 * cell_height,
            width: strip_width,
            height: cell_height,
        };
        let placement = fit_within(photo.aspect_ratio(), cell);
        rasterizer.draw_bitmap(&mut strip, photo, &placement)?;
    }

    let page_width = (STRIP_PAGE_WIDTH_INCHES * dpi).round() as u32;
    debug!(
        "strip composite: strip={}x{}px page={}x{}px",
        strip_width, strip_height, page_width, strip_height
    );

    let mut canvas = rasterizer.new_canvas(page_width, strip_height)?;
    for offset_x in [0, strip_width] {
        let placement = PlacementResult {
            x: offset_x as f64,
            y: 0.0,
            width: strip_width as f64,
            height: strip_height as f64,
        };
        rasterizer.draw_bitmap(&mut canvas, &strip, &placement)?;
    }

    Ok(canvas)
}

/// Crops the left 2x6in strip out of a duplicated-strip composite.
///
/// The region `[0,0]..[2*dpi, 6*dpi]` is copied verbatim and re-encoded; no
/// scaling is applied.
///
/// # Errors
/// Returns a decode failure when the composite payload is not decodable and a
/// crop-bounds failure when the source is smaller than the strip region.
pub fn extract_left_strip(
    rasterizer: &dyn Rasterizer,
    composite_bytes: &[u8],
    dpi: u32,
    jpeg_quality: u8,
) -> Result<CompositeImage, ComposeError> {
    let source = rasterizer.decode(composite_bytes)?;

    let dpi = dpi as f64;
    let strip_width = (STRIP_WIDTH_INCHES * dpi).round() as u32;
    let strip_height = (STRIP_HEIGHT_INCHES * dpi).round() as u32;

    let strip = rasterizer.crop(&source, 0, 0, strip_width, strip_height)?;
    encode_canvas(rasterizer, strip, jpeg_quality)
}

fn validate_photo_set(photos: &[Bitmap], grid: &GridDescriptor) -> Result<(), ComposeError> {
    if photos.is_empty() {
        return Err(ComposeError::EmptyPhotoSet);
    }

    if grid.cols == 0 || grid.rows == 0 {
        return Err(ComposeError::InvalidGridDimensions {
            cols: grid.cols,
            rows: grid.rows,
        });
    }

    let expected = grid.required_photo_count();
    if photos.len() != expected {
        return Err(ComposeError::PhotoCountMismatch {
            expected,
            actual: photos.len(),
        });
    }

    Ok(())
}

fn encode_canvas(
    rasterizer: &dyn Rasterizer,
    canvas: Bitmap,
    jpeg_quality: u8,
) -> Result<CompositeImage, ComposeError> {
    let bytes = rasterizer.encode(&canvas, jpeg_quality)?;

    Ok(CompositeImage {
        width: canvas.width,
        height: canvas.height,
        bytes,
    })
}

/// Error type for composite assembly.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The photo set is empty.
    #[error("photo set is empty")]
    EmptyPhotoSet,
    /// Grid dimensions must both be strictly positive.
    #[error("invalid grid dimensions: {cols}x{rows}")]
    InvalidGridDimensions {
        /// Declared column count.
        cols: u32,
        /// Declared row count.
        rows: u32,
    },
    /// Photo count does not match the layout's required count.
    #[error("invalid photo count: expected {expected}, got {actual}")]
    PhotoCountMismatch {
        /// Required photo count.
        expected: usize,
        /// Actual photo count.
        actual: usize,
    },
    /// Rasterizer failure (decode, encode, or pixel bounds).
    #[error("raster failure: {0}")]
    Raster(#[from] RasterError),
}
