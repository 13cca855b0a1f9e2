//! Integration tests for page size resolution behavior.

use printbooth_core::GridDescriptor;
use printbooth_layout::{resolve_page_size, snap_to_standard_size};

#[test]
fn page_size_resolution_tests_resolves_cataloged_single_layout() {
    let grid = GridDescriptor::new("4x6-single", 1, 1, false).expect("grid should be valid");
    let page = resolve_page_size(Some(&grid));
    assert_eq!(page.width_inches, 4.0);
    assert_eq!(page.height_inches, 6.0);
    assert_eq!(page.label, "4x6");
}

#[test]
fn page_size_resolution_tests_defaults_without_grid() {
    let page = resolve_page_size(None);
    assert_eq!((page.width_inches, page.height_inches), (4.0, 6.0));
}

#[test]
fn page_size_resolution_tests_snaps_3x3_grid_to_8x10() {
    // 3x3 derives 6.2x9.2in; Manhattan distances: 2x4 -> 9.4, 4x6 -> 5.4,
    // 5x7 -> 3.4, 8x10 -> 2.6.
    let grid = GridDescriptor::new("party-9", 3, 3, false).expect("grid should be valid");
    let page = resolve_page_size(Some(&grid));
    assert_eq!(page.label, "8x10");
}

#[test]
fn page_size_resolution_tests_tie_break_prefers_first_listed_size() {
    let page = snap_to_standard_size(4.5, 6.5);
    assert_eq!(page.label, "4x6");
}
