#![warn(missing_docs)]
//! # printbooth-core
//!
//! ## Purpose
//! Defines the pure data model used across the `printbooth` workspace.
//!
//! ## Responsibilities
//! - Represent decoded photo bitmaps with validated geometry.
//! - Represent print grid descriptors as supplied by the UI boundary.
//! - Buffer per-session photos until a grid's required count is reached.
//! - Encode/decode grid descriptors for the JSON boundary contract.
//!
//! ## Data flow
//! The UI layer decodes captures into [`Bitmap`] values and collects them in a
//! [`PhotoTray`]. A complete photo set plus a [`GridDescriptor`] is handed to
//! the compositing layer, which only reads the bitmaps.
//!
//! ## Ownership and lifetimes
//! Bitmaps own their pixel buffers (`Vec<u8>`) to avoid hidden borrow/lifetime
//! coupling between decode, layout, and rasterization stages.
//!
//! ## Error model
//! Validation failures (pixel buffer shape, zero grid dimensions, invalid tray
//! capacity) return [`CoreError`] variants with caller-actionable detail.
//!
//! ## Example
//! ```rust
//! use printbooth_core::{Bitmap, GridDescriptor, PhotoTray};
//!
//! let grid = GridDescriptor::new("4x6-grid", 2, 2, false).unwrap();
//! let mut tray = PhotoTray::for_grid(&grid).unwrap();
//! for index in 0..4 {
//!     let photo = Bitmap::new(2, 1, vec![index as u8; 8]).unwrap();
//!     let _ = tray.push_photo(photo);
//! }
//! assert_eq!(grid.required_photo_count(), 4);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed photo count for the duplicated-strip layout, independent of the
/// descriptor's cols/rows.
pub const STRIP_PHOTO_COUNT: usize = 4;

/// One decoded photo at source resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Raw RGBA pixel buffer (`width * height * 4` bytes, row-major).
    pub rgba: Vec<u8>,
}

impl Bitmap {
    /// Constructs a validated bitmap.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidBitmapShape`] when the pixel buffer length
    /// is not exactly `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, CoreError> {
        let expected_len = required_rgba_len(width, height)?;
        if rgba.len() != expected_len {
            return Err(CoreError::InvalidBitmapShape {
                expected: expected_len,
                actual: rgba.len(),
            });
        }

        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Returns the width/height aspect ratio.
    ///
    /// # Semantics
    /// Values above `1.0` are landscape, values at or below `1.0` are portrait
    /// or square.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Identifies one print layout as selected at the UI boundary.
///
/// Legacy identifier strings are resolved into canonical descriptors before
/// they reach this type; downstream code never branches on raw identifier
/// shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDescriptor {
    /// Canonical or legacy layout identifier.
    pub id: String,
    /// Cell columns on the print page.
    pub cols: u32,
    /// Cell rows on the print page.
    pub rows: u32,
    /// Routes composition through the duplicated-strip path.
    #[serde(default)]
    pub is_strip_grid: bool,
}

impl GridDescriptor {
    /// Constructs a validated grid descriptor.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidGridDimensions`] when either dimension is
    /// zero.
    pub fn new(
        id: impl Into<String>,
        cols: u32,
        rows: u32,
        is_strip_grid: bool,
    ) -> Result<Self, CoreError> {
        if cols == 0 || rows == 0 {
            return Err(CoreError::InvalidGridDimensions { cols, rows });
        }

        Ok(Self {
            id: id.into(),
            cols,
            rows,
            is_strip_grid,
        })
    }

    /// Returns the photo count this layout requires.
    ///
    /// # Semantics
    /// `cols * rows` for plain grids; the strip layout always takes
    /// [`STRIP_PHOTO_COUNT`] photos regardless of its nominal dimensions.
    pub fn required_photo_count(&self) -> usize {
        if self.is_strip_grid {
            STRIP_PHOTO_COUNT
        } else {
            self.cols as usize * self.rows as usize
        }
    }

    /// Serializes the descriptor to compact JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Codec`] when JSON serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self).map_err(CoreError::Codec)
    }

    /// Deserializes and validates a descriptor from JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Codec`] when JSON decoding fails and
    /// [`CoreError::InvalidGridDimensions`] when the decoded dimensions are
    /// zero.
    pub fn from_json_bytes(raw: &[u8]) -> Result<Self, CoreError> {
        let grid: Self = serde_json::from_slice(raw).map_err(CoreError::Codec)?;
        if grid.cols == 0 || grid.rows == 0 {
            return Err(CoreError::InvalidGridDimensions {
                cols: grid.cols,
                rows: grid.rows,
            });
        }

        Ok(grid)
    }
}

/// Bounded per-session buffer that emits complete photo sets.
#[derive(Debug, Clone)]
pub struct PhotoTray {
    capacity: usize,
    photos: Vec<Bitmap>,
}

impl PhotoTray {
    /// Creates a new bounded photo tray.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidTrayCapacity`] when `capacity == 0`.
    pub fn new(capacity: usize) -> Result<Self, CoreError> {
        if capacity == 0 {
            return Err(CoreError::InvalidTrayCapacity);
        }

        Ok(Self {
            capacity,
            photos: Vec::with_capacity(capacity),
        })
    }

    /// Creates a tray sized for one grid's required photo count.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidTrayCapacity`] for a degenerate grid; the
    /// descriptor's own validation makes this unreachable in practice.
    pub fn for_grid(grid: &GridDescriptor) -> Result<Self, CoreError> {
        Self::new(grid.required_photo_count())
    }

    /// Pushes one photo into the tray.
    ///
    /// # Returns
    /// - `None` while the session is still collecting photos.
    /// - `Some(Vec<Bitmap>)` when exactly `capacity` photos have been buffered.
    ///
    /// # Side effects
    /// On emission the internal buffer is drained and reset for the next
    /// session.
    pub fn push_photo(&mut self, photo: Bitmap) -> Option<Vec<Bitmap>> {
        self.photos.push(photo);
        if self.photos.len() == self.capacity {
            let emitted = std::mem::take(&mut self.photos);
            self.photos = Vec::with_capacity(self.capacity);
            return Some(emitted);
        }

        None
    }

    /// Returns current buffered photo count.
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Returns configured tray capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` when no photos are buffered.
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// Error type for core domain validation and codec failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pixel buffer shape does not match declared geometry.
    #[error("invalid bitmap shape: expected {expected} bytes, got {actual}")]
    InvalidBitmapShape {
        /// Expected RGBA byte count.
        expected: usize,
        /// Actual RGBA byte count.
        actual: usize,
    },
    /// Grid dimensions must both be strictly positive.
    #[error("invalid grid dimensions: {cols}x{rows}")]
    InvalidGridDimensions {
        /// Declared column count.
        cols: u32,
        /// Declared row count.
        rows: u32,
    },
    /// Tray capacity must be strictly positive.
    #[error("photo tray capacity must be greater than zero")]
    InvalidTrayCapacity,
    /// Bitmap dimensions overflow addressable buffer space.
    #[error("bitmap dimension overflow")]
    DimensionOverflow,
    /// JSON encoding/decoding error.
    #[error("grid codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}

fn required_rgba_len(width: u32, height: u32) -> Result<usize, CoreError> {
    let pixels = (width as usize)
        .checked_mul(height as usize)
        .ok_or(CoreError::DimensionOverflow)?;

    pixels
        .checked_mul(4)
        .ok_or(CoreError::DimensionOverflow)
}

#[cfg(test)]
mod tests {
    //! Unit tests for core model validation.

    use super::*;

    #[test]
    fn bitmap_rejects_mismatched_buffer_length() {
        let result = Bitmap::new(2, 2, vec![0; 15]);
        assert!(matches!(
            result,
            Err(CoreError::InvalidBitmapShape {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn grid_descriptor_rejects_zero_dimensions() {
        assert!(GridDescriptor::new("bad", 0, 2, false).is_err());
        assert!(GridDescriptor::new("bad", 2, 0, false).is_err());
    }

    #[test]
    fn strip_grid_always_requires_four_photos() {
        let strip = GridDescriptor::new("4x6-strip", 1, 4, true).expect("grid should be valid");
        assert_eq!(strip.required_photo_count(), STRIP_PHOTO_COUNT);

        let plain = GridDescriptor::new("4x6-six", 2, 3, false).expect("grid should be valid");
        assert_eq!(plain.required_photo_count(), 6);
    }

    #[test]
    fn grid_codec_accepts_camel_case_boundary_payload() {
        let raw = br#"{"id":"4x6-strip","cols":1,"rows":4,"isStripGrid":true}"#;
        let grid = GridDescriptor::from_json_bytes(raw).expect("grid should decode");
        assert!(grid.is_strip_grid);

        let raw = br#"{"id":"4x6-grid","cols":2,"rows":2}"#;
        let grid = GridDescriptor::from_json_bytes(raw).expect("grid should decode");
        assert!(!grid.is_strip_grid);
    }

    #[test]
    fn photo_tray_emits_complete_session() {
        let mut tray = PhotoTray::new(2).expect("tray should be valid");
        let photo = Bitmap::new(1, 1, vec![0, 0, 0, 255]).expect("photo should be valid");

        assert!(tray.push_photo(photo.clone()).is_none());
        let emitted = tray.push_photo(photo).expect("tray should emit at capacity");
        assert_eq!(emitted.len(), 2);
        assert!(tray.is_empty());
    }
}
