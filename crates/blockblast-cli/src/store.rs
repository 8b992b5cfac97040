//! On-disk persistence of the current game and the best score.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use blockblast_engine::{GameConfig, GameState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util;

const APP_DIR: &str = "blockblast";
const SAVE_FILE: &str = "save.json";
const HIGH_SCORE_FILE: &str = "highscore.json";

/// Best score ever reached, kept apart from the saved game so that it
/// survives starting over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreRecord {
    pub high_score: u64,
    pub achieved_at: DateTime<Utc>,
}

impl HighScoreRecord {
    pub fn now(high_score: u64) -> Self {
        Self {
            high_score,
            achieved_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// `$XDG_CONFIG_HOME/blockblast`, falling back to `~/.config/blockblast`.
    pub fn default_dir() -> PathBuf {
        let config_home = env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        config_home.join(APP_DIR)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn save_path(&self) -> PathBuf {
        self.dir.join(SAVE_FILE)
    }

    fn high_score_path(&self) -> PathBuf {
        self.dir.join(HIGH_SCORE_FILE)
    }

    /// Loads the saved game, or `None` when there is none.
    ///
    /// An unreadable or malformed save is an error; the caller decides whether
    /// to start over.
    pub fn load_game(&self, config: &GameConfig) -> anyhow::Result<Option<GameState>> {
        let path = self.save_path();
        let Some(json) = util::read_optional_file("save", &path)? else {
            log::debug!("no saved game at {}", path.display());
            return Ok(None);
        };
        let state = GameState::from_json(&json, config)
            .with_context(|| format!("Malformed saved game {}", path.display()))?;
        Ok(Some(state))
    }

    pub fn save_game(&self, state: &GameState) -> anyhow::Result<()> {
        util::write_json_file("save", &self.save_path(), state)
    }

    /// Loads the best-score record, treating a missing or malformed file as no record.
    pub fn load_high_score(&self) -> Option<HighScoreRecord> {
        let path = self.high_score_path();
        let json = match util::read_optional_file("high score", &path) {
            Ok(json) => json?,
            Err(e) => {
                log::warn!("{e:#}");
                return None;
            }
        };
        serde_json::from_str(&json)
            .inspect_err(|e| log::warn!("discarding high score {}: {e}", path.display()))
            .ok()
    }

    pub fn save_high_score(&self, record: &HighScoreRecord) -> anyhow::Result<()> {
        util::write_json_file("high score", &self.high_score_path(), record)
    }
}
