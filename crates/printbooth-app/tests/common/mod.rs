//! Shared fixtures for app integration tests.

use printbooth_core::{Bitmap, GridDescriptor};
use printbooth_raster::{ImageRasterizer, Rasterizer};

/// Creates one opaque solid-color photo.
#[allow(dead_code)]
pub fn solid_photo(width: u32, height: u32, rgb: [u8; 3]) -> Bitmap {
    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..width as usize * height as usize {
        rgba.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    Bitmap::new(width, height, rgba).expect("photo fixture should be valid")
}

/// Creates `count` deterministic photos with distinct shades.
#[allow(dead_code)]
pub fn fixture_photos(count: usize, width: u32, height: u32) -> Vec<Bitmap> {
    (0..count)
        .map(|index| {
            let shade = (40 + index * 50) as u8;
            solid_photo(width, height, [shade, shade / 2, 255 - shade])
        })
        .collect()
}

/// Creates `count` JPEG-encoded photo payloads.
#[allow(dead_code)]
pub fn encoded_fixture_photos(count: usize, width: u32, height: u32) -> Vec<Vec<u8>> {
    let rasterizer = ImageRasterizer::new();
    fixture_photos(count, width, height)
        .iter()
        .map(|photo| {
            rasterizer
                .encode(photo, 95)
                .expect("photo fixture should encode")
        })
        .collect()
}

/// Creates the standard 2x2 collage grid fixture.
#[allow(dead_code)]
pub fn fixture_grid() -> GridDescriptor {
    GridDescriptor::new("4x6-grid", 2, 2, false).expect("grid fixture should be valid")
}
