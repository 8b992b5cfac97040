use crate::core::{grid::Grid, piece::Piece};

use super::placement::first_legal_origin;

/// Returns whether none of `pieces` fits anywhere on `grid`.
///
/// With no pieces at all the game is not over: the tray is refilled before it
/// can be observed empty. Otherwise every piece is tried at every origin in
/// row-major order, stopping at the first fit.
///
/// # Example
///
/// ```
/// use blockblast_engine::{BlockColor, Cell, Grid, Piece, PieceId, SHAPE_CATALOG, is_game_over};
///
/// let grid = Grid::from_fn(8, |r, c| {
///     if (r, c) == (4, 4) { Cell::EMPTY } else { Cell::filled(BlockColor::Violet) }
/// });
/// let domino = Piece::new(PieceId::new("d"), SHAPE_CATALOG[1], BlockColor::Blue);
/// let dot = Piece::new(PieceId::new("e"), SHAPE_CATALOG[0], BlockColor::Blue);
///
/// assert!(is_game_over(&grid, [&domino]));
/// assert!(!is_game_over(&grid, [&domino, &dot]));
/// assert!(!is_game_over(&grid, []));
/// ```
pub fn is_game_over<'a, I>(grid: &Grid, pieces: I) -> bool
where
    I: IntoIterator<Item = &'a Piece>,
{
    let mut any_piece = false;
    for piece in pieces {
        any_piece = true;
        if first_legal_origin(grid, piece.shape()).is_some() {
            return false;
        }
    }
    any_piece
}
