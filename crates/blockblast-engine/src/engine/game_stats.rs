use serde::{Deserialize, Serialize};

/// Per-session move statistics.
///
/// Tracks what the persisted [`GameState`](super::GameState) does not:
///
/// - **Moves**: pieces committed so far
/// - **Cleared lines**: rows plus columns cleared across all moves
/// - **Clearing moves**: moves that cleared at least one line
/// - **Best streak**: longest run of consecutive clearing moves
///
/// # Example
///
/// ```
/// use blockblast_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_move(2, 1);
/// stats.record_move(0, 0);
///
/// assert_eq!(stats.moves(), 2);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.clearing_moves(), 1);
/// assert_eq!(stats.best_streak(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    moves: usize,
    total_cleared_lines: usize,
    clearing_moves: usize,
    best_streak: u32,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            moves: 0,
            total_cleared_lines: 0,
            clearing_moves: 0,
            best_streak: 0,
        }
    }

    #[must_use]
    pub const fn moves(&self) -> usize {
        self.moves
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    #[must_use]
    pub const fn clearing_moves(&self) -> usize {
        self.clearing_moves
    }

    #[must_use]
    pub const fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Updates statistics after a committed move.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Lines cleared by the move
    /// * `streak` - Streak after the move was counted
    pub fn record_move(&mut self, cleared_lines: usize, streak: u32) {
        self.moves += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines > 0 {
            self.clearing_moves += 1;
        }
        self.best_streak = self.best_streak.max(streak);
    }
}
