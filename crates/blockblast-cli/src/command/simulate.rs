use std::path::PathBuf;

use anyhow::Context as _;
use blockblast_engine::{GameConfig, GameController, GameStats, PieceSeed, legal_origins};
use rand::{Rng, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Seed for pieces and move choices, as 32 hex digits [default: random]
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Stop a game after this many moves
    #[arg(long, default_value_t = 10_000)]
    max_moves: usize,
    /// Output file path [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct SimulationSummary {
    seed: PieceSeed,
    mean_score: f64,
    best_score: u64,
    games: Vec<GameSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct GameSummary {
    seed: PieceSeed,
    score: u64,
    /// Whether the game ended by itself rather than hitting the move limit.
    game_over: bool,
    stats: GameStats,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        games,
        seed,
        max_moves,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let summary = simulate(*games, seed, *max_moves)?;
    Output::save_json(&summary, output.clone())
}

fn simulate(
    games: usize,
    seed: PieceSeed,
    max_moves: usize,
) -> anyhow::Result<SimulationSummary> {
    let mut rng = Pcg32::from_seed(seed.to_bytes());
    let games = (0..games)
        .map(|index| {
            let game_seed = rng.random();
            play_game(game_seed, &mut rng, max_moves)
                .with_context(|| format!("Game {index} (seed {game_seed}) failed"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    #[expect(clippy::cast_precision_loss)]
    let mean_score = if games.is_empty() {
        0.0
    } else {
        games.iter().map(|game| game.score as f64).sum::<f64>() / games.len() as f64
    };
    let best_score = games.iter().map(|game| game.score).max().unwrap_or(0);

    Ok(SimulationSummary {
        seed,
        mean_score,
        best_score,
        games,
    })
}

/// Plays uniformly random legal moves until no piece fits or `max_moves` is reached.
fn play_game<R>(seed: PieceSeed, rng: &mut R, max_moves: usize) -> anyhow::Result<GameSummary>
where
    R: Rng,
{
    let mut game = GameController::with_seed(GameConfig::default(), seed);
    while !game.phase().is_terminated() && game.stats().moves() < max_moves {
        let state = game.state();
        let moves = state
            .tray()
            .pieces()
            .flat_map(|piece| {
                legal_origins(state.grid(), piece.shape())
                    .map(move |origin| (piece.id().clone(), origin))
            })
            .collect::<Vec<_>>();
        let Some((piece_id, origin)) = moves.choose(rng).cloned() else {
            break;
        };
        game.commit(origin, &piece_id)?;
        game.flush();
    }

    let state = game.state();
    log::debug!(
        "simulated game {seed}: score {} in {} moves",
        state.score(),
        game.stats().moves()
    );
    Ok(GameSummary {
        seed,
        score: state.score(),
        game_over: state.is_game_over(),
        stats: game.stats().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([42; 16]);

    #[test]
    fn test_simulation_is_reproducible() {
        let a = simulate(3, SEED, 40).unwrap();
        let b = simulate(3, SEED, 40).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.games.len(), 3);
        assert_ne!(a.games[0].seed, a.games[1].seed);
    }

    #[test]
    fn test_games_respect_move_limit() {
        let summary = simulate(2, SEED, 5).unwrap();
        for game in &summary.games {
            assert!(game.stats.moves() <= 5);
            assert!(game.score >= game.stats.moves() as u64);
        }
        assert_eq!(
            summary.best_score,
            summary.games.iter().map(|g| g.score).max().unwrap()
        );
    }

    #[test]
    fn test_unbounded_games_end_in_game_over() {
        let summary = simulate(2, SEED, usize::MAX).unwrap();
        assert!(summary.games.iter().all(|game| game.game_over));
        assert!(summary.mean_score > 0.0);
    }

    #[test]
    fn test_zero_games() {
        let summary = simulate(0, SEED, 10).unwrap();
        assert!(summary.games.is_empty());
        assert!(summary.mean_score.abs() < f64::EPSILON);
        assert_eq!(summary.best_score, 0);
    }
}
