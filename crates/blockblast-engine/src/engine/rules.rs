//! The move rules as pure functions over [`GameState`] snapshots.
//!
//! [`commit`] performs the marking phase of a move and [`resolve_clear`] the
//! resolution phase. Neither touches its input; both return the next state.
//! [`GameController`](super::GameController) sequences the two with a
//! scheduler in between.

use crate::{
    CommitError,
    core::{grid::Origin, piece::PieceId},
};

use super::{
    clear::LineClears, config::GameConfig, game_over::is_game_over, game_state::GameState,
    piece_factory::PieceFactory, scoring::score_move,
};

/// Result of a successful [`commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    /// State after the marking phase.
    pub state: GameState,
    /// Lines completed by the move, already marked as clearing in `state`.
    pub clears: LineClears,
    /// Points earned by the move.
    pub score_delta: u64,
    /// Whether the move emptied the tray and triggered a refill.
    pub refilled: bool,
}

/// Places the tray piece `piece_id` at `origin`.
///
/// The piece's cells are stamped, completed lines are detected and marked as
/// clearing, the score and streak are updated, the piece leaves the tray, and
/// the tray is refilled when that left it empty. When nothing was cleared the
/// game-over check runs right away; otherwise it waits for [`resolve_clear`].
///
/// A rejected commit returns an error and no state.
pub fn commit(
    state: &GameState,
    origin: Origin,
    piece_id: &PieceId,
    factory: &mut PieceFactory,
    config: &GameConfig,
) -> Result<Committed, CommitError> {
    if state.is_game_over() {
        return Err(CommitError::GameOver);
    }
    if state.grid().has_clearing() {
        return Err(CommitError::ResolutionPending);
    }
    let piece = state
        .tray()
        .get(piece_id)
        .ok_or(CommitError::PieceNotInTray)?;

    let grid = state.grid().with_piece(piece, origin)?;
    let clears = LineClears::detect(&grid);
    let score_delta = score_move(piece, clears.count(), state.streak());
    let score = state.score() + score_delta;
    let high_score = state.high_score().max(score);

    let mut tray = state.tray().clone();
    tray.take(piece_id);
    let refilled = tray.refill_if_depleted(factory, config.tray_size);

    let (grid, streak, game_over) = if clears.is_empty() {
        let game_over = is_game_over(&grid, tray.pieces());
        (grid, 0, game_over)
    } else {
        (clears.mark(&grid), state.streak() + 1, false)
    };

    Ok(Committed {
        state: GameState::from_parts(score, high_score, streak, game_over, grid, tray),
        clears,
        score_delta,
        refilled,
    })
}

/// Empties every clearing cell and re-runs the game-over check.
///
/// A state without clearing cells is returned unchanged, so resolving twice
/// is the same as resolving once.
#[must_use]
pub fn resolve_clear(state: &GameState) -> GameState {
    if !state.grid().has_clearing() {
        return state.clone();
    }
    let grid = state.grid().resolved();
    let game_over = is_game_over(&grid, state.tray().pieces());
    GameState::from_parts(
        state.score(),
        state.high_score(),
        state.streak(),
        game_over,
        grid,
        state.tray().clone(),
    )
}
