//! Integration tests for fail-fast photo count validation.

mod common;

use printbooth_app::{compose_print, AppError};
use printbooth_compose::{ComposeError, ComposeOptions};
use printbooth_raster::ImageRasterizer;

#[test]
fn photo_count_guard_tests_rejects_one_photo_on_2x2_grid() {
    let rasterizer = ImageRasterizer::new();
    let payloads = common::encoded_fixture_photos(1, 64, 48);
    let grid = common::fixture_grid();

    let result = compose_print(&rasterizer, &payloads, &grid, &ComposeOptions::default());
    assert!(matches!(
        result,
        Err(AppError::Compose(ComposeError::PhotoCountMismatch {
            expected: 4,
            actual: 1
        }))
    ));
}

#[test]
fn photo_count_guard_tests_rejects_empty_photo_set() {
    let rasterizer = ImageRasterizer::new();
    let grid = common::fixture_grid();

    let result = compose_print(&rasterizer, &[], &grid, &ComposeOptions::default());
    assert!(matches!(
        result,
        Err(AppError::Compose(ComposeError::EmptyPhotoSet))
    ));
}
