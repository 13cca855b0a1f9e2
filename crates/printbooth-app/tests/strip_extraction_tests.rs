//! Integration tests for left-strip extraction.

mod common;

use printbooth_app::{compose_print, strip_preview, AppError};
use printbooth_compose::{ComposeError, ComposeOptions};
use printbooth_layout::grid_for_id;
use printbooth_raster::{ImageRasterizer, RasterError};

#[test]
fn strip_extraction_tests_crops_left_half_at_strip_dimensions() {
    let rasterizer = ImageRasterizer::new();
    let payloads = common::encoded_fixture_photos(4, 120, 90);
    let grid = grid_for_id("4x6-strip").expect("strip id should resolve");

    let options = ComposeOptions {
        dpi: 100,
        ..ComposeOptions::default()
    };
    let composite = compose_print(&rasterizer, &payloads, &grid, &options)
        .expect("strip composite should build");

    let preview = strip_preview(&rasterizer, &composite.bytes, 100, 95)
        .expect("strip preview should build");
    assert_eq!(preview.width, 2 * 100);
    assert_eq!(preview.height, 6 * 100);
}

#[test]
fn strip_extraction_tests_fails_on_undecodable_composite() {
    let rasterizer = ImageRasterizer::new();

    let result = strip_preview(&rasterizer, b"corrupt composite", 300, 95);
    assert!(matches!(
        result,
        Err(AppError::Compose(ComposeError::Raster(
            RasterError::Decode(_)
        )))
    ));
}
