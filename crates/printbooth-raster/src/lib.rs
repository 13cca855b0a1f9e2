#![warn(missing_docs)]
//! # printbooth-raster
//!
//! ## Purpose
//! Provides the pixel-level capability used by the compositing layer: decode,
//! encode, canvas allocation, scaled drawing, and cropping.
//!
//! ## Responsibilities
//! - Define a backend-agnostic [`Rasterizer`] trait so the capability is
//!   injected rather than globally ambient.
//! - Expose the production [`ImageRasterizer`] backed by the `image` crate.
//!
//! ## Data flow
//! Encoded photo payloads -> [`Rasterizer::decode`] -> compositor draws into
//! a canvas bitmap -> [`Rasterizer::encode`] -> composite bytes.
//!
//! ## Ownership and lifetimes
//! Canvases are plain owned [`Bitmap`] values; one canvas belongs to exactly
//! one composite invocation and is dropped after encoding.
//!
//! ## Error model
//! Codec and bounds failures are reported as [`RasterError`] values; a decode
//! failure never yields a partial bitmap.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use printbooth_core::{Bitmap, CoreError};
use printbooth_layout::PlacementResult;
use thiserror::Error;

/// Resampling filter used when scaling photos into placement rectangles.
const PLACEMENT_FILTER: FilterType = FilterType::Triangle;

/// Pixel-level capability consumed by the compositing layer.
pub trait Rasterizer: Send + Sync {
    /// Decodes an encoded image payload into an RGBA bitmap.
    ///
    /// # Errors
    /// Returns [`RasterError::Decode`] when the payload is not a decodable
    /// raster image.
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap, RasterError>;

    /// Encodes a bitmap as JPEG at the given quality (1-100).
    ///
    /// # Errors
    /// Returns [`RasterError::Encode`] on encoder failure.
    fn encode(&self, bitmap: &Bitmap, quality: u8) -> Result<Vec<u8>, RasterError>;

    /// Allocates an opaque white canvas.
    ///
    /// # Errors
    /// Returns [`RasterError::Core`] when the dimensions overflow addressable
    /// buffer space.
    fn new_canvas(&self, width: u32, height: u32) -> Result<Bitmap, RasterError>;

    /// Draws a source bitmap into a placement rectangle on the canvas.
    ///
    /// The source is resampled to the rounded placement size (no resample when
    /// the sizes already match), then blitted with clamping at the canvas
    /// edges. No rotation, no cropping of the source.
    ///
    /// # Errors
    /// Returns [`RasterError::InvalidBuffer`] when the source bitmap cannot
    /// back an image view.
    fn draw_bitmap(
        &self,
        canvas: &mut Bitmap,
        source: &Bitmap,
        placement: &PlacementResult,
    ) -> Result<(), RasterError>;

    /// Copies a pixel region out of a bitmap, verbatim.
    ///
    /// # Errors
    /// Returns [`RasterError::CropOutOfBounds`] when the region extends past
    /// the source bitmap.
    fn crop(
        &self,
        source: &Bitmap,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Bitmap, RasterError>;
}

/// Production rasterizer backed by the `image` crate.
///
/// Deterministic pure-CPU codecs and resampling; the same inputs always
/// produce the same bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRasterizer;

impl ImageRasterizer {
    /// Creates the production rasterizer.
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for ImageRasterizer {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap, RasterError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|error| RasterError::Decode(error.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        Bitmap::new(width, height, rgba.into_raw()).map_err(RasterError::Core)
    }

    fn encode(&self, bitmap: &Bitmap, quality: u8) -> Result<Vec<u8>, RasterError> {
        let rgb = rgba_to_rgb(&bitmap.rgba);
        let mut bytes = Vec::new();

        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality)
            .encode(
                &rgb,
                bitmap.width,
                bitmap.height,
                image::ColorType::Rgb8.into(),
            )
            .map_err(|error| RasterError::Encode(error.to_string()))?;

        Ok(bytes)
    }

    fn new_canvas(&self, width: u32, height: u32) -> Result<Bitmap, RasterError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(RasterError::Core(CoreError::DimensionOverflow))?;

        Bitmap::new(width, height, vec![0xFF; len]).map_err(RasterError::Core)
    }

    fn draw_bitmap(
        &self,
        canvas: &mut Bitmap,
        source: &Bitmap,
        placement: &PlacementResult,
    ) -> Result<(), RasterError> {
        let target_width = placement.width.round().max(1.0) as u32;
        let target_height = placement.height.round().max(1.0) as u32;

        if target_width == source.width && target_height == source.height {
            blit(canvas, &source.rgba, target_width, target_height, placement);
            return Ok(());
        }

        let view = RgbaImage::from_raw(source.width, source.height, source.rgba.clone())
            .ok_or_else(|| {
                RasterError::InvalidBuffer(format!(
                    "source buffer does not back a {}x{} image",
                    source.width, source.height
                ))
            })?;
        let resized = imageops::resize(&view, target_width, target_height, PLACEMENT_FILTER);

        blit(canvas, resized.as_raw(), target_width, target_height, placement);
        Ok(())
    }

    fn crop(
        &self,
        source: &Bitmap,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Bitmap, RasterError> {
        let right = x.checked_add(width);
        let bottom = y.checked_add(height);
        if right.is_none_or(|edge| edge > source.width)
            || bottom.is_none_or(|edge| edge > source.height)
        {
            return Err(RasterError::CropOutOfBounds {
                source_width: source.width,
                source_height: source.height,
                x,
                y,
                width,
                height,
            });
        }

        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        let source_stride = source.width as usize * 4;
        let row_len = width as usize * 4;
        for row in 0..height as usize {
            let offset = (y as usize + row) * source_stride + x as usize * 4;
            rgba.extend_from_slice(&source.rgba[offset..offset + row_len]);
        }

        Bitmap::new(width, height, rgba).map_err(RasterError::Core)
    }
}

/// Copies resampled rows into the canvas, clamped at the canvas edges.
fn blit(canvas: &mut Bitmap, pixels: &[u8], width: u32, height: u32, placement: &PlacementResult) {
    let origin_x = placement.x.round().max(0.0) as usize;
    let origin_y = placement.y.round().max(0.0) as usize;
    let canvas_width = canvas.width as usize;
    let canvas_height = canvas.height as usize;

    if origin_x >= canvas_width {
        return;
    }

    let copy_width = (width as usize).min(canvas_width - origin_x);
    let source_stride = width as usize * 4;

    for row in 0..height as usize {
        let canvas_y = origin_y + row;
        if canvas_y >= canvas_height {
            break;
        }

        let source_offset = row * source_stride;
        let canvas_offset = (canvas_y * canvas_width + origin_x) * 4;
        canvas.rgba[canvas_offset..canvas_offset + copy_width * 4]
            .copy_from_slice(&pixels[source_offset..source_offset + copy_width * 4]);
    }
}

fn rgba_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity((rgba.len() / 4) * 3);
    for pixel in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
    }
    rgb
}

/// Error type for codec and pixel-bounds failures.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Payload could not be decoded as a raster image.
    #[error("image decode failure: {0}")]
    Decode(String),
    /// Canvas could not be encoded.
    #[error("image encode failure: {0}")]
    Encode(String),
    /// Pixel buffer does not back a valid image view.
    #[error("invalid pixel buffer: {0}")]
    InvalidBuffer(String),
    /// Crop region extends past the source bitmap.
    #[error(
        "crop region {width}x{height}+{x}+{y} exceeds source {source_width}x{source_height}"
    )]
    CropOutOfBounds {
        /// Source bitmap width.
        source_width: u32,
        /// Source bitmap height.
        source_height: u32,
        /// Requested region left edge.
        x: u32,
        /// Requested region top edge.
        y: u32,
        /// Requested region width.
        width: u32,
        /// Requested region height.
        height: u32,
    },
    /// Core bitmap validation failure.
    #[error("bitmap error: {0}")]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    //! Unit tests for codec round trips and pixel operations.

    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Bitmap {
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            rgba.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Bitmap::new(width, height, rgba).expect("bitmap should be valid")
    }

    #[test]
    fn encode_then_decode_preserves_dimensions() {
        let rasterizer = ImageRasterizer::new();
        let photo = solid(8, 6, [200, 10, 10]);

        let bytes = rasterizer.encode(&photo, 95).expect("encode should work");
        let decoded = rasterizer.decode(&bytes).expect("decode should work");
        assert_eq!(decoded.width, 8);
        assert_eq!(decoded.height, 6);
    }

    #[test]
    fn decode_rejects_non_image_payload() {
        let rasterizer = ImageRasterizer::new();
        let result = rasterizer.decode(b"not an image payload");
        assert!(matches!(result, Err(RasterError::Decode(_))));
    }

    #[test]
    fn draw_fills_placement_and_leaves_background_white() {
        let rasterizer = ImageRasterizer::new();
        let mut canvas = rasterizer.new_canvas(8, 8).expect("canvas should allocate");
        let photo = solid(2, 2, [0, 0, 0]);

        let placement = PlacementResult {
            x: 2.0,
            y: 2.0,
            width: 4.0,
            height: 4.0,
        };
        rasterizer
            .draw_bitmap(&mut canvas, &photo, &placement)
            .expect("draw should work");

        // Inside the placement rectangle: solid black.
        let inside = (4 * 8 + 4) * 4;
        assert_eq!(&canvas.rgba[inside..inside + 3], &[0, 0, 0]);

        // Outside: untouched white background.
        assert_eq!(&canvas.rgba[0..3], &[255, 255, 255]);
    }

    #[test]
    fn crop_copies_region_verbatim_and_checks_bounds() {
        let rasterizer = ImageRasterizer::new();
        let mut canvas = rasterizer.new_canvas(4, 4).expect("canvas should allocate");
        let photo = solid(2, 2, [9, 9, 9]);
        rasterizer
            .draw_bitmap(
                &mut canvas,
                &photo,
                &PlacementResult {
                    x: 0.0,
                    y: 0.0,
                    width: 2.0,
                    height: 2.0,
                },
            )
            .expect("draw should work");

        let cropped = rasterizer.crop(&canvas, 0, 0, 2, 2).expect("crop should work");
        assert_eq!(cropped.rgba, photo.rgba);

        assert!(matches!(
            rasterizer.crop(&canvas, 3, 3, 2, 2),
            Err(RasterError::CropOutOfBounds { .. })
        ));
    }
}
