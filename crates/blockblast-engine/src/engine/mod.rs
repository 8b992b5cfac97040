//! Game rules and state management.
//!
//! This module builds the rules of the game on top of the core data model:
//!
//! - [`PieceFactory`] - Random piece generation (uniform shape and color)
//! - [`Tray`] - The pieces available to the player, refilled all at once
//! - [`can_place`] / [`legal_origins`] - Legality of a placement
//! - [`LineClears`] - Detection and marking of full rows and columns
//! - [`score_move`] - Points for a move
//! - [`is_game_over`] - Exhaustive search for any remaining placement
//! - [`TargetResolver`] - Pointer-to-origin snapping for drag input
//! - [`GameState`] - Persistable snapshot of a game
//! - [`commit`] / [`resolve_clear`] - The move rules as pure functions
//! - [`GameController`] - State machine sequencing moves and clears
//!
//! # Game Flow
//!
//! 1. Start a [`GameController`] with a fresh or restored [`GameState`]
//! 2. Pick a tray piece and an origin, then commit it
//! 3. Completed lines are marked and resolved once the [`ClearScheduler`] fires
//! 4. The tray refills after its last piece is used
//! 5. Repeat until no tray piece fits anywhere
//!
//! # Example
//!
//! ```
//! use blockblast_engine::{GameConfig, GameController, legal_origins};
//!
//! let mut game = GameController::new(GameConfig::default());
//!
//! while !game.phase().is_terminated() {
//!     let Some((id, origin)) = game.state().tray().pieces().find_map(|piece| {
//!         legal_origins(game.state().grid(), piece.shape())
//!             .next()
//!             .map(|origin| (piece.id().clone(), origin))
//!     }) else {
//!         break;
//!     };
//!     game.commit(origin, &id).unwrap();
//!     game.flush();
//!     if game.stats().moves() >= 20 {
//!         break;
//!     }
//! }
//!
//! println!("score: {}", game.state().score());
//! ```

pub use self::{
    clear::*, config::*, controller::*, game_over::*, game_state::*, game_stats::*,
    piece_factory::*, placement::*, rules::*, scheduler::*, scoring::*, target::*, tray::*,
};

mod clear;
mod config;
mod controller;
mod game_over;
mod game_state;
mod game_stats;
mod piece_factory;
mod placement;
mod rules;
mod scheduler;
mod scoring;
mod target;
mod tray;
