use arrayvec::ArrayVec;

use crate::core::grid::{Grid, MAX_BOARD_SIZE};

/// Rows and columns that are completely filled after a placement.
///
/// Rows and columns are counted as separate lines: a cell at the crossing of a
/// full row and a full column belongs to both, and [`count`](Self::count) is
/// `rows + cols`, not the number of distinct cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClears {
    rows: ArrayVec<usize, MAX_BOARD_SIZE>,
    cols: ArrayVec<usize, MAX_BOARD_SIZE>,
}

impl LineClears {
    /// Finds every full row and column of `grid`, each in ascending order.
    ///
    /// # Example
    ///
    /// ```
    /// use blockblast_engine::{BlockColor, Cell, Grid, LineClears};
    ///
    /// let grid = Grid::from_fn(8, |r, c| {
    ///     if r == 0 || c == 7 { Cell::filled(BlockColor::Blue) } else { Cell::EMPTY }
    /// });
    /// let clears = LineClears::detect(&grid);
    /// assert_eq!(clears.rows(), &[0]);
    /// assert_eq!(clears.cols(), &[7]);
    /// assert_eq!(clears.count(), 2);
    /// ```
    #[must_use]
    pub fn detect(grid: &Grid) -> Self {
        Self {
            rows: (0..grid.size()).filter(|&r| grid.is_row_full(r)).collect(),
            cols: (0..grid.size()).filter(|&c| grid.is_col_full(c)).collect(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    #[must_use]
    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// Number of cleared lines (full rows plus full columns).
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns whether the cell at `(row, col)` lies on a cleared line.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows.contains(&row) || self.cols.contains(&col)
    }

    /// Returns a copy of `grid` with the cleared lines marked as clearing.
    ///
    /// Marked cells stay filled until [`Grid::resolved`] empties them.
    #[must_use]
    pub fn mark(&self, grid: &Grid) -> Grid {
        grid.marked_clearing(&self.rows, &self.cols)
    }
}
