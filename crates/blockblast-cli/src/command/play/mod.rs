use std::path::PathBuf;

use anyhow::Context as _;
use blockblast_engine::{GameConfig, GameController, PieceFactory, PieceSeed, TickScheduler};

use crate::{store::Store, tui::Runtime};

use self::{app::PlayApp, screen::PlayScreen};

mod app;
mod screen;

/// Game logic ticks per second.
pub(crate) const TICK_RATE: u64 = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Directory for the saved game and best score [default: $XDG_CONFIG_HOME/blockblast]
    #[clap(long)]
    save_dir: Option<PathBuf>,
    /// Seed for piece generation, as 32 hex digits
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Start a new game instead of resuming the saved one
    #[clap(long)]
    new: bool,
    /// Length of the line clear animation in milliseconds
    #[clap(long, default_value_t = GameConfig::DEFAULT_CLEAR_DELAY_MILLIS)]
    clear_delay_ms: u64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            save_dir: None,
            seed: None,
            new: false,
            clear_delay_ms: GameConfig::DEFAULT_CLEAR_DELAY_MILLIS,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        save_dir,
        seed,
        new,
        clear_delay_ms,
    } = arg;

    let config = GameConfig {
        clear_delay_ticks: GameConfig::ticks_for_millis(*clear_delay_ms, TICK_RATE),
        ..GameConfig::default()
    };
    let store = Store::new(save_dir.clone().unwrap_or_else(Store::default_dir));
    let best = store.load_high_score();
    let best_score = best.map_or(0, |record| record.high_score);
    let (game, notice) = load_game(&store, config, *seed, *new);
    let mut screen = PlayScreen::new(game.with_best_score(best_score), store, best);
    if let Some(notice) = notice {
        screen = screen.with_status(notice);
    }

    let mut app = PlayApp::new(screen);
    Runtime::new()
        .run(&mut app)
        .context("Failed to run the terminal UI")?;
    app.finish()
}

/// Resumes the saved game unless `new` is set or there is nothing usable to resume.
///
/// Also returns a note for the player when a saved game had to be discarded.
fn load_game(
    store: &Store,
    config: GameConfig,
    seed: Option<PieceSeed>,
    new: bool,
) -> (GameController, Option<String>) {
    let factory = seed.map_or_else(PieceFactory::new, PieceFactory::with_seed);
    let fresh =
        |factory: PieceFactory| GameController::with_parts(config, factory, TickScheduler::default());
    if new {
        return (fresh(factory), None);
    }

    let restored = store.load_game(&config).and_then(|saved| {
        saved
            .map(|state| {
                GameController::from_state(config, state, factory.clone(), TickScheduler::default())
                    .context("Saved game cannot be resumed")
            })
            .transpose()
    });
    match restored {
        Ok(Some(game)) => (game, None),
        Ok(None) => (fresh(factory), None),
        Err(e) => {
            log::warn!("discarding saved game: {e:#}");
            (fresh(factory), Some(format!("Saved game discarded: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use blockblast_engine::GameState;

    use super::*;
    use crate::store::tests::temp_store;

    const SEED: PieceSeed = PieceSeed::from_bytes([9; 16]);

    #[test]
    fn test_fresh_game_without_save() {
        let store = temp_store("play-no-save");
        let (game, notice) = load_game(&store, GameConfig::default(), Some(SEED), false);
        assert!(notice.is_none());
        assert_eq!(game.state().score(), 0);
    }

    #[test]
    fn test_saved_game_is_resumed() {
        let store = temp_store("play-resume");
        let config = GameConfig::default();
        let mut factory = PieceFactory::with_seed(PieceSeed::from_bytes([3; 16]));
        let state = GameState::new(&config, &mut factory, 7);
        store.save_game(&state).unwrap();

        let (game, notice) = load_game(&store, config, Some(SEED), false);
        assert!(notice.is_none());
        assert_eq!(game.state().tray(), state.tray());

        let (game, notice) = load_game(&store, config, Some(SEED), true);
        assert!(notice.is_none());
        assert_ne!(game.state().tray(), state.tray());
    }

    #[test]
    fn test_discarded_save_is_reported() {
        let store = temp_store("play-discard");
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.dir().join("save.json"), "{not json").unwrap();

        let (game, notice) = load_game(&store, GameConfig::default(), Some(SEED), false);
        let notice = notice.unwrap();
        assert!(notice.starts_with("Saved game discarded: Malformed saved game"));
        assert_eq!(game.stats().moves(), 0);
    }
}
