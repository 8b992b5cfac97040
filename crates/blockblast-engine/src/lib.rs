//! Placement-and-clearing engine for an 8×8 block puzzle.
//!
//! Pieces drawn from a fixed polyomino catalog wait in a tray; placing one
//! stamps its cells onto the board, full rows and columns clear in two
//! phases, and the game ends once no tray piece fits anywhere.
//!
//! - [`core`] holds the data model: shapes, colors, pieces, and the grid.
//! - [`engine`] holds the rules: piece generation, placement, clears,
//!   scoring, game-over detection, and the [`GameController`] state machine.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reason a piece cannot be stamped at a given origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("piece extends outside the board")]
    OutOfBounds,
    #[display("piece overlaps a filled cell")]
    Overlap,
}

/// Reason a commit was rejected. The game state is untouched in every case.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum CommitError {
    #[display("{_0}")]
    Placement(PlacementError),
    #[display("piece is not in the tray")]
    PieceNotInTray,
    #[display("a line clear is still being resolved")]
    ResolutionPending,
    #[display("the game is over")]
    GameOver,
}

impl From<PlacementError> for CommitError {
    fn from(err: PlacementError) -> Self {
        CommitError::Placement(err)
    }
}

/// Malformed shape matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape must have between 1 and {} rows and columns", MAX_SHAPE_SIDE)]
    InvalidSize,
    #[display("shape rows must all have the same length")]
    RaggedRows,
    #[display("shape cells must be 0 or 1, got {_0}")]
    InvalidCell(#[error(not(source))] u8),
    #[display("shape has no occupied cells")]
    Empty,
}

/// Persisted game state that cannot be restored.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum LoadError {
    #[display("malformed game state: {_0}")]
    Json(serde_json::Error),
    #[display("expected a {expected}x{expected} grid, got {actual}x{actual}")]
    GridSize { expected: usize, actual: usize },
    #[display("piece id {_0} appears more than once in the tray")]
    DuplicatePieceId(#[error(not(source))] PieceId),
}
