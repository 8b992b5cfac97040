use crate::core::piece::Piece;

/// Points per cleared line before the streak multiplier.
pub const LINE_CLEAR_SCORE: u64 = 100;

/// Computes the points earned by one move.
///
/// - Placement: one point per occupied cell of `piece`.
/// - Clears: [`LINE_CLEAR_SCORE`] per cleared line, multiplied by
///   `streak_before + 1`, where `streak_before` is the streak *before* this
///   move is counted.
///
/// # Example
///
/// ```
/// use blockblast_engine::{BlockColor, Piece, PieceId, SHAPE_CATALOG, score_move};
///
/// let dot = Piece::new(PieceId::new("a"), SHAPE_CATALOG[0], BlockColor::Blue);
/// assert_eq!(score_move(&dot, 0, 4), 1);
/// assert_eq!(score_move(&dot, 2, 0), 201);
/// assert_eq!(score_move(&dot, 2, 1), 401);
/// ```
#[must_use]
pub fn score_move(piece: &Piece, cleared_count: usize, streak_before: u32) -> u64 {
    let placement_score = piece.cell_count() as u64;
    let clear_score = cleared_count as u64 * LINE_CLEAR_SCORE * (u64::from(streak_before) + 1);
    placement_score + clear_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockColor, PieceId, SHAPE_CATALOG};

    #[test]
    fn test_placement_score_counts_occupied_cells_only() {
        // plus shape: 5 occupied cells in a 3x3 box
        let plus = Piece::new(PieceId::new("p"), SHAPE_CATALOG[20], BlockColor::Cyan);
        assert_eq!(score_move(&plus, 0, 0), 5);
    }

    #[test]
    fn test_streak_multiplies_clear_score() {
        let bar = Piece::new(PieceId::new("b"), SHAPE_CATALOG[3], BlockColor::Cyan);
        assert_eq!(score_move(&bar, 1, 0), 103);
        assert_eq!(score_move(&bar, 1, 1), 203);
        assert_eq!(score_move(&bar, 3, 2), 903);
    }

    #[test]
    fn test_score_never_decreases() {
        for shape in crate::SHAPE_CATALOG {
            let piece = Piece::new(PieceId::new("s"), shape, BlockColor::Blue);
            for cleared in 0..=16 {
                for streak in 0..10 {
                    assert!(score_move(&piece, cleared, streak) >= 1);
                }
            }
        }
    }
}
