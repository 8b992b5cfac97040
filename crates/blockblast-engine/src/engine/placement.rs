//! Placement validation: where a piece may go on a grid.

use crate::core::{
    grid::{Grid, Origin},
    piece::Piece,
    shape::Shape,
};

/// Returns whether `piece` fits with its top-left corner at `origin`.
///
/// Every occupied cell must land inside the board on an unfilled cell.
#[must_use]
pub fn can_place(grid: &Grid, piece: &Piece, origin: Origin) -> bool {
    grid.can_place(piece.shape(), origin)
}

/// Returns every board origin `(row, col)` with `0 <= row, col < N` where
/// `shape` fits, in row-major order.
pub fn legal_origins<'a>(grid: &'a Grid, shape: &'a Shape) -> impl Iterator<Item = Origin> + 'a {
    let size = i32::try_from(grid.size()).unwrap_or(i32::MAX);
    (0..size)
        .flat_map(move |row| (0..size).map(move |col| Origin::new(row, col)))
        .filter(move |origin| grid.can_place(shape, *origin))
}

/// Returns the first origin, in row-major order, where `shape` fits.
#[must_use]
pub fn first_legal_origin(grid: &Grid, shape: &Shape) -> Option<Origin> {
    legal_origins(grid, shape).next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockColor, Cell, PieceId, SHAPE_CATALOG};

    #[test]
    fn test_legal_origins_on_empty_board() {
        let grid = Grid::new(8);
        let square3 = SHAPE_CATALOG[19];
        let origins = legal_origins(&grid, &square3).collect::<Vec<_>>();
        assert_eq!(origins.len(), 36);
        assert_eq!(origins[0], Origin::new(0, 0));
        assert_eq!(origins[1], Origin::new(0, 1));
        assert_eq!(origins[35], Origin::new(5, 5));
    }

    #[test]
    fn test_first_legal_origin_skips_filled_cells() {
        let grid = Grid::from_fn(8, |r, _| {
            if r < 7 {
                Cell::filled(BlockColor::Cyan)
            } else {
                Cell::EMPTY
            }
        });
        let bar = SHAPE_CATALOG[3];
        assert_eq!(first_legal_origin(&grid, &bar), Some(Origin::new(7, 0)));
        let vertical = SHAPE_CATALOG[2];
        assert_eq!(first_legal_origin(&grid, &vertical), None);

        let piece = Piece::new(PieceId::new("x"), bar, BlockColor::Cyan);
        assert!(can_place(&grid, &piece, Origin::new(7, 5)));
        assert!(!can_place(&grid, &piece, Origin::new(7, 6)));
    }

    #[test]
    fn test_shape_larger_than_board_has_no_origins() {
        let grid = Grid::new(4);
        let line5 = SHAPE_CATALOG[17];
        assert_eq!(legal_origins(&grid, &line5).count(), 0);
    }
}
