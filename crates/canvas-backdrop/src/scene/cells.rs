//! Visible cell lattice

use crate::math::Rect;

/// Integer cell coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub col: i64,
    pub row: i64,
}

impl Cell {
    pub const fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }

    /// World-space square covered by this cell
    pub fn bounds(&self, cell_size: f64) -> Rect {
        Rect::new(
            self.col as f64 * cell_size,
            self.row as f64 * cell_size,
            cell_size,
            cell_size,
        )
    }
}

/// Inclusive rectangle of cell indices
///
/// Holds exactly the cells whose extent intersects the covered rectangle
/// grown by `margin_cells` cells on every side. Bounds saturate at the
/// `i64` range for far pans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub col_min: i64,
    pub col_max: i64,
    pub row_min: i64,
    pub row_max: i64,
}

impl CellRange {
    /// Cells intersecting `rect` expanded by `margin_cells` whole cells
    ///
    /// `cell_size` must be finite and > 0.
    pub fn covering(rect: &Rect, cell_size: f64, margin_cells: u32) -> Self {
        let area = rect.expand(cell_size * margin_cells as f64);
        let (col_min, col_max) = axis_span(area.x, area.right(), cell_size);
        let (row_min, row_max) = axis_span(area.y, area.bottom(), cell_size);
        Self {
            col_min,
            col_max,
            row_min,
            row_max,
        }
    }

    pub fn columns(&self) -> u64 {
        axis_len(self.col_min, self.col_max)
    }

    pub fn rows(&self) -> u64 {
        axis_len(self.row_min, self.row_max)
    }

    /// Number of cells, saturating
    pub fn len(&self) -> u64 {
        self.columns().saturating_mul(self.rows())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.col_min..=self.col_max).contains(&cell.col)
            && (self.row_min..=self.row_max).contains(&cell.row)
    }

    /// Row-major iteration
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.col_min..=self.col_max;
        (self.row_min..=self.row_max)
            .flat_map(move |row| cols.clone().map(move |col| Cell::new(col, row)))
    }
}

/// Cells `[c*s, (c+1)*s)` overlapping the open interval `(min, max)`
fn axis_span(min: f64, max: f64, cell_size: f64) -> (i64, i64) {
    let first = (min / cell_size).floor();
    let last = (max / cell_size).ceil() - 1.0;
    // NaN casts to 0; `as` saturates infinities
    (first as i64, last as i64)
}

fn axis_len(min: i64, max: i64) -> u64 {
    if max < min {
        0
    } else {
        (max as i128 - min as i128 + 1) as u64
    }
}
