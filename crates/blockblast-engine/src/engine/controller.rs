use crate::{
    CommitError, LoadError,
    core::{grid::Origin, piece::PieceId},
};

use super::{
    clear::LineClears,
    config::GameConfig,
    game_over::is_game_over,
    game_state::GameState,
    game_stats::GameStats,
    piece_factory::{PieceFactory, PieceSeed},
    rules,
    scheduler::{ClearScheduler, TickScheduler},
    target::{BoardRect, Pointer, TargetResolver},
};

/// Where the controller is in the move protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    /// Waiting for a commit.
    Idle,
    /// A line clear is marked and waiting for the scheduler.
    Resolving,
    /// No tray piece fits anywhere.
    Terminated,
}

/// Outcome of an accepted [`GameController::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub clears: LineClears,
    pub score_delta: u64,
    pub refilled: bool,
    pub phase: Phase,
}

/// Drives a game through the two-phase move protocol.
///
/// A commit stamps the piece and marks completed lines right away; the marked
/// lines are emptied once the [`ClearScheduler`] fires. Commits arriving in
/// between are rejected with [`CommitError::ResolutionPending`]; call
/// [`flush`](Self::flush) first to resolve early.
///
/// # Example
///
/// ```
/// use blockblast_engine::{GameConfig, GameController, PieceSeed, first_legal_origin};
///
/// let config = GameConfig { clear_delay_ticks: 3, ..GameConfig::default() };
/// let mut game = GameController::with_seed(config, PieceSeed::from_bytes([7; 16]));
///
/// let piece = game.state().tray().pieces().next().unwrap().clone();
/// let origin = first_legal_origin(game.state().grid(), piece.shape()).unwrap();
/// let report = game.commit(origin, piece.id()).unwrap();
///
/// assert_eq!(report.score_delta, piece.cell_count() as u64);
/// assert_eq!(game.state().grid().filled_count(), piece.cell_count());
/// assert!(game.phase().is_idle());
/// ```
#[derive(Debug, Clone)]
pub struct GameController<S = TickScheduler> {
    config: GameConfig,
    state: GameState,
    factory: PieceFactory,
    scheduler: S,
    stats: GameStats,
}

impl GameController {
    /// Starts a fresh game with a randomly seeded factory.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_parts(config, PieceFactory::new(), TickScheduler::default())
    }

    /// Starts a fresh game whose pieces are fully determined by `seed`.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: PieceSeed) -> Self {
        Self::with_parts(
            config,
            PieceFactory::with_seed(seed),
            TickScheduler::default(),
        )
    }
}

impl<S> GameController<S>
where
    S: ClearScheduler,
{
    pub fn with_parts(config: GameConfig, mut factory: PieceFactory, scheduler: S) -> Self {
        let state = GameState::new(&config, &mut factory, 0);
        Self {
            config,
            state,
            factory,
            scheduler,
            stats: GameStats::new(),
        }
    }

    /// Resumes a persisted game.
    ///
    /// The state is validated against `config`. A clear left pending when
    /// the game was saved is resolved now, a depleted tray is refilled, and
    /// the game-over flag is recomputed from the board.
    pub fn from_state(
        config: GameConfig,
        state: GameState,
        mut factory: PieceFactory,
        scheduler: S,
    ) -> Result<Self, LoadError> {
        let state = rules::resolve_clear(&state.validated(&config)?);

        let mut tray = state.tray().clone();
        if tray.refill_if_depleted(&mut factory, config.tray_size) {
            log::debug!("refilled depleted tray of restored game");
        }
        let game_over = is_game_over(state.grid(), tray.pieces());
        let state = GameState::from_parts(
            state.score(),
            state.high_score(),
            state.streak(),
            game_over,
            state.grid().clone(),
            tray,
        );

        Ok(Self {
            config,
            state,
            factory,
            scheduler,
            stats: GameStats::new(),
        })
    }

    /// Raises the high score to at least `best_score`, a record kept outside the game.
    #[must_use]
    pub fn with_best_score(mut self, best_score: u64) -> Self {
        self.state = self.state.with_best_score(best_score);
        self
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.state.grid().has_clearing() {
            Phase::Resolving
        } else if self.state.is_game_over() {
            Phase::Terminated
        } else {
            Phase::Idle
        }
    }

    /// Places the tray piece `piece_id` with its top-left corner at `origin`.
    ///
    /// On error nothing changes.
    pub fn commit(
        &mut self,
        origin: Origin,
        piece_id: &PieceId,
    ) -> Result<MoveReport, CommitError> {
        let committed = rules::commit(
            &self.state,
            origin,
            piece_id,
            &mut self.factory,
            &self.config,
        )?;
        log::debug!(
            "committed piece {piece_id} at ({}, {}): +{} points",
            origin.row,
            origin.col,
            committed.score_delta,
        );
        if committed.refilled {
            log::debug!("tray refilled");
        }

        self.state = committed.state;
        self.stats
            .record_move(committed.clears.count(), self.state.streak());

        if committed.clears.is_empty() {
            self.log_game_over();
        } else {
            log::debug!(
                "clearing rows {:?} and columns {:?} (streak {})",
                committed.clears.rows(),
                committed.clears.cols(),
                self.state.streak(),
            );
            self.scheduler.schedule(self.config.clear_delay_ticks);
        }

        Ok(MoveReport {
            clears: committed.clears,
            score_delta: committed.score_delta,
            refilled: committed.refilled,
            phase: self.phase(),
        })
    }

    /// Advances the clear scheduler by one tick.
    ///
    /// Returns whether a pending clear was resolved.
    pub fn tick(&mut self) -> bool {
        if !self.scheduler.tick() {
            return false;
        }
        self.resolve()
    }

    /// Resolves a pending clear immediately.
    ///
    /// Returns whether there was anything to resolve.
    pub fn flush(&mut self) -> bool {
        self.scheduler.cancel();
        self.resolve()
    }

    /// Starts a new game, keeping the high score.
    pub fn restart(&mut self) {
        self.scheduler.cancel();
        self.state = GameState::new(&self.config, &mut self.factory, self.state.high_score());
        self.stats = GameStats::new();
        log::debug!("game restarted");
    }

    /// Snaps a dragged pointer to an origin where the tray piece `piece_id`
    /// fits, or `None` if it fits nowhere near the pointer.
    #[must_use]
    pub fn resolve_target(
        &self,
        resolver: &TargetResolver,
        pointer: Pointer,
        board: BoardRect,
        piece_id: &PieceId,
    ) -> Option<Origin> {
        let piece = self.state.tray().get(piece_id)?;
        resolver.resolve(self.state.grid(), pointer, board, piece)
    }

    fn resolve(&mut self) -> bool {
        if !self.state.grid().has_clearing() {
            return false;
        }
        self.state = rules::resolve_clear(&self.state);
        log::debug!("line clear resolved");
        self.log_game_over();
        true
    }

    fn log_game_over(&self) {
        if self.state.is_game_over() {
            log::debug!(
                "game over: score {} after {} moves",
                self.state.score(),
                self.stats.moves()
            );
        }
    }
}
