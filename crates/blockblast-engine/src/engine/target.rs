use crate::core::{
    grid::{Grid, Origin},
    piece::Piece,
};

/// Pointer position, in the same unit as the [`BoardRect`] (pixels, terminal cells, ...).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen bounding box of the board.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoardRect {
    /// A square board whose height equals its width.
    #[must_use]
    pub const fn square(left: f64, top: f64, width: f64) -> Self {
        Self {
            left,
            top,
            width,
            height: width,
        }
    }
}

/// Turns a dragged pointer into the board origin the piece would snap to.
///
/// The piece is centered under the pointer (after shifting the pointer by
/// `y_offset`, which keeps the piece visible above a finger), and its
/// top-left corner is rounded to the nearest cell.
///
/// # Example
///
/// ```
/// use blockblast_engine::{
///     BlockColor, BoardRect, Grid, Origin, Piece, PieceId, Pointer, SHAPE_CATALOG,
///     TargetResolver,
/// };
///
/// let resolver = TargetResolver::new(0.0);
/// let board = BoardRect::square(100.0, 50.0, 400.0); // 50px cells
/// let square = Piece::new(PieceId::new("sq"), SHAPE_CATALOG[7], BlockColor::Blue);
///
/// // pointer at the corner shared by cells (2, 2), (2, 3), (3, 2) and (3, 3)
/// let pointer = Pointer::new(100.0 + 150.0, 50.0 + 150.0);
/// let target = resolver.resolve(&Grid::new(8), pointer, board, &square);
/// assert_eq!(target, Some(Origin::new(2, 2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetResolver {
    y_offset: f64,
}

impl Default for TargetResolver {
    fn default() -> Self {
        Self::new(Self::TOUCH_Y_OFFSET)
    }
}

#[expect(clippy::cast_possible_truncation)]
fn round_half_up(value: f64) -> Option<i32> {
    let rounded = (value + 0.5).floor();
    if !rounded.is_finite() || rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
        return None;
    }
    Some(rounded as i32)
}

impl TargetResolver {
    /// Vertical pointer shift used by touch front ends, in pixels.
    pub const TOUCH_Y_OFFSET: f64 = -80.0;

    #[must_use]
    pub const fn new(y_offset: f64) -> Self {
        Self { y_offset }
    }

    #[must_use]
    pub const fn y_offset(&self) -> f64 {
        self.y_offset
    }

    /// Computes the snapped origin without checking whether the piece fits.
    ///
    /// Returns `None` only for degenerate geometry (empty board rect or
    /// non-finite coordinates).
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn candidate(
        &self,
        pointer: Pointer,
        board: BoardRect,
        board_size: usize,
        piece: &Piece,
    ) -> Option<Origin> {
        if board_size == 0 || board.width <= 0.0 || board.height <= 0.0 {
            return None;
        }
        let cell_width = board.width / board_size as f64;
        let cell_height = board.height / board_size as f64;

        let rel_x = pointer.x - board.left;
        let rel_y = pointer.y + self.y_offset - board.top;

        let top_left_x = rel_x - piece.width() as f64 * cell_width / 2.0;
        let top_left_y = rel_y - piece.height() as f64 * cell_height / 2.0;

        Some(Origin::new(
            round_half_up(top_left_y / cell_height)?,
            round_half_up(top_left_x / cell_width)?,
        ))
    }

    /// Computes the snapped origin and keeps it only if `piece` fits there.
    ///
    /// A `None` result means no ghost preview should be shown.
    #[must_use]
    pub fn resolve(
        &self,
        grid: &Grid,
        pointer: Pointer,
        board: BoardRect,
        piece: &Piece,
    ) -> Option<Origin> {
        self.candidate(pointer, board, grid.size(), piece)
            .filter(|origin| grid.can_place(piece.shape(), *origin))
    }
}
