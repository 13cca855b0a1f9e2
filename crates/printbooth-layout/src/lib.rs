#![warn(missing_docs)]
//! # printbooth-layout
//!
//! ## Purpose
//! Pure print-layout geometry: the supported-layout catalog, physical page
//! size resolution, cell ordering, and aspect-preserving placement.
//!
//! ## Responsibilities
//! - Map layout identifiers (canonical and legacy) to grid descriptors and
//!   page sizes.
//! - Derive a page size for uncataloged grids and snap it to a standard size.
//! - Compute column-major cell positions for photo-to-cell assignment.
//! - Compute "contain" placement rectangles inside cell pixel boxes.
//!
//! ## Data flow
//! UI selection -> [`grid_for_id`] -> compositor resolves the page via
//! [`resolve_page_size`], walks cells via [`cell_position`], and places each
//! photo via [`fit_within`].
//!
//! ## Ownership and lifetimes
//! Everything here is value math over `Copy` geometry; the catalog is
//! `'static` data.
//!
//! ## Error model
//! All functions are total. Invalid grid dimensions are rejected upstream by
//! `printbooth_core::GridDescriptor`.

use printbooth_core::GridDescriptor;
use serde::{Deserialize, Serialize};

/// Fixed inter-cell gap, in inches, used when deriving page and cell sizes.
pub const CELL_GAP_INCHES: f64 = 0.1;

/// Per-cell width assumption, in inches, for uncataloged grids.
const DERIVED_CELL_WIDTH_INCHES: f64 = 2.0;

/// Per-cell height assumption, in inches, for uncataloged grids.
const DERIVED_CELL_HEIGHT_INCHES: f64 = 3.0;

/// Standard print page sizes, in inches, with canonical labels.
///
/// The list order is observable behavior: snapping keeps the first listed
/// size on equal Manhattan distance.
pub static STANDARD_PAGE_SIZES: [(f64, f64, &str); 4] = [
    (2.0, 4.0, "2x4"),
    (4.0, 6.0, "4x6"),
    (5.0, 7.0, "5x7"),
    (8.0, 10.0, "8x10"),
];

/// Physical page size derived for one composite request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSizeConfig {
    /// Page width in inches.
    pub width_inches: f64,
    /// Page height in inches.
    pub height_inches: f64,
    /// Canonical size label, e.g. `"4x6"`.
    pub label: String,
}

/// One supported layout in the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry {
    /// Canonical layout identifier.
    pub id: &'static str,
    /// Identifier kept from earlier catalog revisions, matched on lookup.
    pub legacy_id: Option<&'static str>,
    /// Cell columns.
    pub cols: u32,
    /// Cell rows.
    pub rows: u32,
    /// Whether composition routes through the duplicated-strip path.
    pub is_strip_grid: bool,
    /// Page width in inches.
    pub page_width_inches: f64,
    /// Page height in inches.
    pub page_height_inches: f64,
    /// Canonical page size label.
    pub page_label: &'static str,
}

static LAYOUT_CATALOG: [LayoutEntry; 5] = [
    LayoutEntry {
        id: "4x6-single",
        legacy_id: Some("single"),
        cols: 1,
        rows: 1,
        is_strip_grid: false,
        page_width_inches: 4.0,
        page_height_inches: 6.0,
        page_label: "4x6",
    },
    LayoutEntry {
        id: "4x6-split",
        legacy_id: Some("2-up"),
        cols: 2,
        rows: 1,
        is_strip_grid: false,
        page_width_inches: 4.0,
        page_height_inches: 6.0,
        page_label: "4x6",
    },
    LayoutEntry {
        id: "4x6-grid",
        legacy_id: Some("collage"),
        cols: 2,
        rows: 2,
        is_strip_grid: false,
        page_width_inches: 4.0,
        page_height_inches: 6.0,
        page_label: "4x6",
    },
    LayoutEntry {
        id: "4x6-six",
        legacy_id: Some("6-up"),
        cols: 2,
        rows: 3,
        is_strip_grid: false,
        page_width_inches: 4.0,
        page_height_inches: 6.0,
        page_label: "4x6",
    },
    LayoutEntry {
        id: "4x6-strip",
        legacy_id: Some("strip"),
        cols: 1,
        rows: 4,
        is_strip_grid: true,
        page_width_inches: 4.0,
        page_height_inches: 6.0,
        page_label: "4x6",
    },
];

/// Returns the fixed catalog of supported layouts.
pub fn supported_layouts() -> &'static [LayoutEntry] {
    &LAYOUT_CATALOG
}

/// Looks up a layout by canonical or legacy identifier.
pub fn find_layout(id: &str) -> Option<&'static LayoutEntry> {
    LAYOUT_CATALOG
        .iter()
        .find(|entry| entry.id == id || entry.legacy_id == Some(id))
}

/// Builds the canonical grid descriptor for a catalog identifier.
///
/// Legacy identifiers are resolved here, once, at the UI boundary; the
/// returned descriptor always carries the canonical id.
pub fn grid_for_id(id: &str) -> Option<GridDescriptor> {
    let entry = find_layout(id)?;
    GridDescriptor::new(entry.id, entry.cols, entry.rows, entry.is_strip_grid).ok()
}

/// Resolves the physical page size for one composite request.
///
/// # Semantics
/// - `None` resolves to the default 4x6 page.
/// - A catalog identifier (canonical or legacy) resolves to its fixed page.
/// - Anything else derives a candidate from the grid dimensions (2x3 in per
///   cell plus the fixed inter-cell gap) and snaps it to the nearest standard
///   size.
pub fn resolve_page_size(grid: Option<&GridDescriptor>) -> PageSizeConfig {
    let Some(grid) = grid else {
        return default_page_size();
    };

    if let Some(entry) = find_layout(&grid.id) {
        return PageSizeConfig {
            width_inches: entry.page_width_inches,
            height_inches: entry.page_height_inches,
            label: entry.page_label.to_string(),
        };
    }

    let width = DERIVED_CELL_WIDTH_INCHES * grid.cols as f64
        + CELL_GAP_INCHES * grid.cols.saturating_sub(1) as f64;
    let height = DERIVED_CELL_HEIGHT_INCHES * grid.rows as f64
        + CELL_GAP_INCHES * grid.rows.saturating_sub(1) as f64;

    snap_to_standard_size(width, height)
}

/// Snaps a candidate page size to the nearest standard size by Manhattan
/// distance on (width, height).
///
/// Strict-less comparison keeps the first listed size on ties.
pub fn snap_to_standard_size(width_inches: f64, height_inches: f64) -> PageSizeConfig {
    let mut best = &STANDARD_PAGE_SIZES[0];
    let mut best_distance = f64::INFINITY;

    for candidate in &STANDARD_PAGE_SIZES {
        let distance =
            (width_inches - candidate.0).abs() + (height_inches - candidate.1).abs();
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }

    PageSizeConfig {
        width_inches: best.0,
        height_inches: best.1,
        label: best.2.to_string(),
    }
}

fn default_page_size() -> PageSizeConfig {
    PageSizeConfig {
        width_inches: 4.0,
        height_inches: 6.0,
        label: "4x6".to_string(),
    }
}

/// Pixel box available for one photo on the destination canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBox {
    /// Left edge on the canvas, in pixels.
    pub x: u32,
    /// Top edge on the canvas, in pixels.
    pub y: u32,
    /// Box width in pixels.
    pub width: u32,
    /// Box height in pixels.
    pub height: u32,
}

/// Placement rectangle produced by the contain-fit calculation.
///
/// Fractional pixel coordinates; rasterization rounds at draw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    /// Left edge of the drawn image.
    pub x: f64,
    /// Top edge of the drawn image.
    pub y: f64,
    /// Drawn width.
    pub width: f64,
    /// Drawn height.
    pub height: f64,
}

/// Computes the contain-fit placement of an image inside a cell box.
///
/// # Semantics
/// - Image relatively wider than the cell: drawn at full cell width, flush to
///   the cell's left edge, vertically centered.
/// - Image relatively taller or equal: drawn at full cell height, flush to
///   the cell's top edge, horizontally centered.
///
/// The result is fully contained in the cell, preserves the image aspect
/// ratio exactly, and never crops. `image_aspect` must be positive and the
/// cell non-degenerate.
pub fn fit_within(image_aspect: f64, cell: CellBox) -> PlacementResult {
    let cell_aspect = cell.width as f64 / cell.height as f64;

    if image_aspect > cell_aspect {
        let width = cell.width as f64;
        let height = width / image_aspect;
        PlacementResult {
            x: cell.x as f64,
            y: cell.y as f64 + (cell.height as f64 - height) / 2.0,
            width,
            height,
        }
    } else {
        let height = cell.height as f64;
        let width = height * image_aspect;
        PlacementResult {
            x: cell.x as f64 + (cell.width as f64 - width) / 2.0,
            y: cell.y as f64,
            width,
            height,
        }
    }
}

/// Maps a photo index to its (col, row) cell in column-major vertical fill.
///
/// Index `i` fills a column top-to-bottom, then moves to the next column.
/// `rows` must be positive.
pub fn cell_position(index: usize, rows: u32) -> (u32, u32) {
    let col = index as u32 / rows;
    let row = index as u32 % rows;
    (col, row)
}

/// Produces the full deterministic column-major cell walk for a grid.
pub fn column_major_positions(cols: u32, rows: u32) -> Vec<(u32, u32)> {
    if cols == 0 || rows == 0 {
        return Vec::new();
    }

    (0..cols as usize * rows as usize)
        .map(|index| cell_position(index, rows))
        .collect()
}
