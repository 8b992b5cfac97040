use serde::{Deserialize, Serialize};

use crate::core::grid::DEFAULT_BOARD_SIZE;

use super::tray::DEFAULT_TRAY_SIZE;

/// Game parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Rows and columns of the square board.
    pub board_size: usize,
    /// Number of tray slots drawn on every refill.
    pub tray_size: usize,
    /// Ticks between marking a line clear and resolving it.
    pub clear_delay_ticks: u32,
}

impl GameConfig {
    /// Clear animation length of the reference front end, in milliseconds.
    pub const DEFAULT_CLEAR_DELAY_MILLIS: u64 = 300;

    /// Number of ticks at `tick_rate` Hz that cover `millis` milliseconds, rounded up.
    #[must_use]
    pub fn ticks_for_millis(millis: u64, tick_rate: u64) -> u32 {
        u32::try_from(millis.saturating_mul(tick_rate).div_ceil(1000)).unwrap_or(u32::MAX)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            tray_size: DEFAULT_TRAY_SIZE,
            clear_delay_ticks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_for_millis() {
        assert_eq!(GameConfig::ticks_for_millis(300, 60), 18);
        assert_eq!(GameConfig::ticks_for_millis(10, 60), 1);
        assert_eq!(GameConfig::ticks_for_millis(0, 60), 0);
    }

    #[test]
    fn test_huge_delays_saturate() {
        assert_eq!(GameConfig::ticks_for_millis(u64::MAX, 60), u32::MAX);
        assert_eq!(GameConfig::ticks_for_millis(u64::MAX / 2, 60), u32::MAX);
        assert_eq!(GameConfig::ticks_for_millis(100_000_000_000, 60), u32::MAX);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"traySize": 4}"#).unwrap();
        assert_eq!(config.board_size, 8);
        assert_eq!(config.tray_size, 4);
        assert_eq!(config.clear_delay_ticks, 0);
    }
}
