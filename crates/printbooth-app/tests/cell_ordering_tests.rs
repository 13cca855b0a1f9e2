//! Tests deterministic column-major photo-to-cell assignment.

use printbooth_layout::{cell_position, column_major_positions};

#[test]
fn cell_ordering_tests_enforces_column_major_vertical_fill() {
    // Index i fills a column top-to-bottom, then moves right.
    assert_eq!(cell_position(0, 2), (0, 0));
    assert_eq!(cell_position(1, 2), (0, 1));
    assert_eq!(cell_position(2, 2), (1, 0));
    assert_eq!(cell_position(3, 2), (1, 1));

    let walk = column_major_positions(2, 3);
    assert_eq!(
        walk,
        vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
    );
}
