use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    LoadError,
    core::{
        grid::Grid,
        piece::{Piece, PieceId},
    },
};

use super::{config::GameConfig, piece_factory::PieceFactory, tray::Tray};

/// Complete, persistable snapshot of a game.
///
/// Every move produces a new `GameState`; nothing mutates one in place.
///
/// Serialized as
/// `{ score, highScore, streak, gameOver, grid, availableBlocks }`, the format
/// the front end persists between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(default)]
    score: u64,
    #[serde(default)]
    high_score: u64,
    #[serde(default)]
    streak: u32,
    #[serde(default)]
    game_over: bool,
    grid: Grid,
    #[serde(rename = "availableBlocks")]
    tray: Tray,
}

impl GameState {
    /// Starts a new game: zero score, empty board, a freshly drawn tray.
    ///
    /// `high_score` carries over from earlier games.
    pub fn new(config: &GameConfig, factory: &mut PieceFactory, high_score: u64) -> Self {
        Self {
            score: 0,
            high_score,
            streak: 0,
            game_over: false,
            grid: Grid::new(config.board_size),
            tray: Tray::draw(factory, config.tray_size),
        }
    }

    pub(crate) fn from_parts(
        score: u64,
        high_score: u64,
        streak: u32,
        game_over: bool,
        grid: Grid,
        tray: Tray,
    ) -> Self {
        Self {
            score,
            high_score,
            streak,
            game_over,
            grid,
            tray,
        }
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Number of consecutive moves, up to the latest, that cleared at least one line.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    /// Parses a persisted state and checks it with [`validated`](Self::validated).
    ///
    /// Missing numeric fields default to zero; a missing or non-square grid,
    /// a tray that is not an array, and unknown colors or shapes are errors.
    pub fn from_json(json: &str, config: &GameConfig) -> Result<Self, LoadError> {
        let state: Self = serde_json::from_str(json).map_err(LoadError::Json)?;
        state.validated(config)
    }

    /// Checks a deserialized state against `config`.
    ///
    /// The grid must have the configured size and tray ids must be distinct.
    /// The high score is raised to at least the score.
    pub fn validated(mut self, config: &GameConfig) -> Result<Self, LoadError> {
        if self.grid.size() != config.board_size {
            return Err(LoadError::GridSize {
                expected: config.board_size,
                actual: self.grid.size(),
            });
        }
        if let Some(id) = duplicate_id(&self.tray) {
            return Err(LoadError::DuplicatePieceId(id));
        }
        self.high_score = self.high_score.max(self.score);
        Ok(self)
    }

    /// Raises the high score to at least `best_score`, a separately tracked record.
    #[must_use]
    pub fn with_best_score(mut self, best_score: u64) -> Self {
        self.high_score = self.high_score.max(best_score);
        self
    }
}

fn duplicate_id(tray: &Tray) -> Option<PieceId> {
    let mut ids = HashSet::new();
    tray.pieces()
        .map(Piece::id)
        .find(|id| !ids.insert(*id))
        .cloned()
}
