use serde::{Deserialize, Serialize};

use crate::PlacementError;

use super::{color::BlockColor, piece::Piece, shape::Shape};

/// Board dimension used unless configured otherwise.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Largest supported board dimension.
pub const MAX_BOARD_SIZE: usize = 16;

/// A single board cell.
///
/// A cell is filled exactly when it carries a color. `clearing` marks filled
/// cells that belong to a completed line awaiting resolution; it is never set
/// on an empty cell.
///
/// Serialized as `{ filled, color, clearing? }` with `color` set to `""` for
/// empty cells and `clearing` omitted when false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CellRepr", into = "CellRepr")]
pub struct Cell {
    color: Option<BlockColor>,
    clearing: bool,
}

impl Cell {
    pub const EMPTY: Self = Self {
        color: None,
        clearing: false,
    };

    #[must_use]
    pub const fn filled(color: BlockColor) -> Self {
        Self {
            color: Some(color),
            clearing: false,
        }
    }

    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.color.is_some()
    }

    #[must_use]
    pub const fn is_clearing(&self) -> bool {
        self.clearing
    }

    #[must_use]
    pub const fn color(&self) -> Option<BlockColor> {
        self.color
    }

    const fn marked_clearing(self) -> Self {
        Self {
            color: self.color,
            clearing: self.color.is_some(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct CellRepr {
    filled: bool,
    #[serde(default)]
    color: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    clearing: bool,
}

impl TryFrom<CellRepr> for Cell {
    type Error = String;

    fn try_from(repr: CellRepr) -> Result<Self, Self::Error> {
        if !repr.filled {
            return Ok(Cell::EMPTY);
        }
        let color = BlockColor::from_hex(&repr.color)
            .ok_or_else(|| format!("filled cell has unknown color: {:?}", repr.color))?;
        Ok(Cell {
            color: Some(color),
            clearing: repr.clearing,
        })
    }
}

impl From<Cell> for CellRepr {
    fn from(cell: Cell) -> Self {
        Self {
            filled: cell.is_filled(),
            color: cell.color.map(BlockColor::as_hex).unwrap_or_default().to_owned(),
            clearing: cell.clearing,
        }
    }
}

/// Candidate top-left board position of a piece.
///
/// Coordinates are signed: pointer-derived candidates may lie above or left of
/// the board, and only [`Grid::check_placement`] decides whether they are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Origin {
    pub row: i32,
    pub col: i32,
}

impl Origin {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

fn absolute(base: i32, offset: usize, size: usize) -> Option<usize> {
    let offset = i32::try_from(offset).ok()?;
    let pos = usize::try_from(base.checked_add(offset)?).ok()?;
    (pos < size).then_some(pos)
}

/// Square board of [`Cell`]s stored in row-major order.
///
/// A grid never changes size. Operations that change cells return a new grid
/// so every move produces an independent snapshot.
///
/// Serialized as a matrix of cells (`Cell[N][N]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty `size`×`size` grid.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or larger than [`MAX_BOARD_SIZE`].
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::from_fn(size, |_, _| Cell::EMPTY)
    }

    /// Creates a grid whose cell at `(row, col)` is `f(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or larger than [`MAX_BOARD_SIZE`].
    #[must_use]
    pub fn from_fn<F>(size: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Cell,
    {
        assert!(
            (1..=MAX_BOARD_SIZE).contains(&size),
            "board size must be in 1..={MAX_BOARD_SIZE}, got {size}"
        );
        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .map(|(row, col)| f(row, col))
            .collect();
        Self { size, cells }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `(row, col)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.size && col < self.size).then(|| self.cells[row * self.size + col])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.size)
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Returns whether any cell is waiting for a line clear to resolve.
    #[must_use]
    pub fn has_clearing(&self) -> bool {
        self.cells.iter().any(Cell::is_clearing)
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows().nth(row).is_some_and(|r| r.iter().all(Cell::is_filled))
    }

    #[must_use]
    pub fn is_col_full(&self, col: usize) -> bool {
        col < self.size && self.rows().all(|r| r[col].is_filled())
    }

    /// Checks that every occupied cell of `shape`, placed with its top-left
    /// corner at `origin`, lands on an empty cell inside the board.
    pub fn check_placement(&self, shape: &Shape, origin: Origin) -> Result<(), PlacementError> {
        for (dr, dc) in shape.occupied_cells() {
            let (Some(row), Some(col)) = (
                absolute(origin.row, dr, self.size),
                absolute(origin.col, dc, self.size),
            ) else {
                return Err(PlacementError::OutOfBounds);
            };
            if self.cells[row * self.size + col].is_filled() {
                return Err(PlacementError::Overlap);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn can_place(&self, shape: &Shape, origin: Origin) -> bool {
        self.check_placement(shape, origin).is_ok()
    }

    /// Returns a copy of this grid with `piece` stamped at `origin`.
    pub fn with_piece(&self, piece: &Piece, origin: Origin) -> Result<Self, PlacementError> {
        self.check_placement(piece.shape(), origin)?;
        let mut grid = self.clone();
        for (dr, dc) in piece.shape().occupied_cells() {
            // both coordinates were validated above
            let row = absolute(origin.row, dr, self.size).unwrap_or_default();
            let col = absolute(origin.col, dc, self.size).unwrap_or_default();
            grid.cells[row * self.size + col] = Cell::filled(piece.color());
        }
        Ok(grid)
    }

    /// Returns a copy with every filled cell of the given rows and columns marked as clearing.
    #[must_use]
    pub fn marked_clearing(&self, rows: &[usize], cols: &[usize]) -> Self {
        let mut grid = self.clone();
        for (i, cell) in grid.cells.iter_mut().enumerate() {
            let (row, col) = (i / self.size, i % self.size);
            if rows.contains(&row) || cols.contains(&col) {
                *cell = cell.marked_clearing();
            }
        }
        grid
    }

    /// Returns a copy with every clearing cell emptied.
    #[must_use]
    pub fn resolved(&self) -> Self {
        let mut grid = self.clone();
        for cell in &mut grid.cells {
            if cell.is_clearing() {
                *cell = Cell::EMPTY;
            }
        }
        grid
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
    type Error = String;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        let size = rows.len();
        if !(1..=MAX_BOARD_SIZE).contains(&size) {
            return Err(format!(
                "grid must have 1..={MAX_BOARD_SIZE} rows, got {size}"
            ));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(format!(
                "grid must be square: {size} rows but a row has {} cells",
                row.len()
            ));
        }
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

impl From<Grid> for Vec<Vec<Cell>> {
    fn from(grid: Grid) -> Self {
        grid.rows().map(<[Cell]>::to_vec).collect()
    }
}
