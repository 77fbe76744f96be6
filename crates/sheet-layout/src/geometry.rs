//! Page and cell geometry.
//!
//! All lengths are in points. Coordinates are top-left origin, y-down;
//! the document sink flips them into PDF space.

use crate::{A4_HEIGHT_PT, A4_WIDTH_PT, CELL_SIDE_CM, CM_TO_PT};

/// Fixed page/cell dimensions and the grid capacity derived from them.
///
/// Precondition: `cell_side` must not exceed either page dimension, so
/// `columns >= 1` and `rows >= 1`. `derive` debug-asserts this; it is not a
/// runtime error path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub cell_side: f32,
    pub columns: usize,
    pub rows: usize,
    pub cells_per_page: usize,
}

impl PageGeometry {
    /// Derive the grid from page and cell dimensions.
    pub fn derive(page_width: f32, page_height: f32, cell_side: f32) -> Self {
        let columns = (page_width / cell_side).floor() as usize;
        let rows = (page_height / cell_side).floor() as usize;
        debug_assert!(columns >= 1 && rows >= 1, "cell larger than page");
        Self {
            page_width,
            page_height,
            cell_side,
            columns,
            rows,
            cells_per_page: columns * rows,
        }
    }

    /// The production geometry: A4 stock with 1.5 cm square labels.
    pub fn a4() -> Self {
        Self::derive(A4_WIDTH_PT, A4_HEIGHT_PT, CELL_SIDE_CM * CM_TO_PT)
    }
}

/// Grid position of the i-th record of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPlacement {
    pub page: usize,
    pub row: usize,
    pub column: usize,
}

impl CellPlacement {
    /// Placement is a pure function of the running index and the geometry.
    pub fn for_index(index: usize, geometry: &PageGeometry) -> Self {
        let page = index / geometry.cells_per_page;
        let pos_in_page = index % geometry.cells_per_page;
        Self {
            page,
            row: pos_in_page / geometry.columns,
            column: pos_in_page % geometry.columns,
        }
    }

    /// Top-left corner of the cell on its page, in points.
    pub fn cell_origin(&self, geometry: &PageGeometry) -> (f32, f32) {
        (
            self.column as f32 * geometry.cell_side,
            self.row as f32 * geometry.cell_side,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_grid_is_14_by_19() {
        let g = PageGeometry::a4();
        assert_eq!(g.columns, 14);
        assert_eq!(g.rows, 19);
        assert_eq!(g.cells_per_page, 266);
    }

    #[test]
    fn cell_side_is_1_5_cm_in_points() {
        let g = PageGeometry::a4();
        assert!((g.cell_side - 42.519684).abs() < 1e-3);
    }

    #[test]
    fn first_index_lands_top_left() {
        let g = PageGeometry::a4();
        let p = CellPlacement::for_index(0, &g);
        assert_eq!(
            p,
            CellPlacement {
                page: 0,
                row: 0,
                column: 0
            }
        );
    }

    #[test]
    fn last_cell_of_first_page() {
        let g = PageGeometry::a4();
        let p = CellPlacement::for_index(g.cells_per_page - 1, &g);
        assert_eq!(p.page, 0);
        assert_eq!(p.row, 18);
        assert_eq!(p.column, 13);
    }

    #[test]
    fn first_cell_of_second_page() {
        let g = PageGeometry::a4();
        let p = CellPlacement::for_index(g.cells_per_page, &g);
        assert_eq!(
            p,
            CellPlacement {
                page: 1,
                row: 0,
                column: 0
            }
        );
    }

    #[test]
    fn placements_fill_left_to_right_top_to_bottom() {
        let g = PageGeometry::a4();
        let a = CellPlacement::for_index(0, &g);
        let b = CellPlacement::for_index(1, &g);
        assert_eq!(b.column, a.column + 1);
        assert_eq!(b.row, 0);
        let wrap = CellPlacement::for_index(g.columns, &g);
        assert_eq!(wrap.column, 0);
        assert_eq!(wrap.row, 1);
    }

    #[test]
    fn no_two_indices_share_a_cell() {
        let g = PageGeometry::a4();
        let mut seen = std::collections::HashSet::new();
        for i in 0..(g.cells_per_page * 2 + 7) {
            let p = CellPlacement::for_index(i, &g);
            assert!(seen.insert((p.page, p.row, p.column)), "duplicate at {i}");
        }
    }

    #[test]
    fn cell_origin_scales_with_grid_position() {
        let g = PageGeometry::a4();
        let p = CellPlacement::for_index(g.columns + 2, &g);
        let (x, y) = p.cell_origin(&g);
        assert!((x - 2.0 * g.cell_side).abs() < 1e-4);
        assert!((y - g.cell_side).abs() < 1e-4);
    }
}
