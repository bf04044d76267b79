//! Session state and turn orchestration.
//!
//! - [`GameSession`] - owns the board, score and terminal flag; plays turns
//! - [`TurnResult`] - the snapshot handed back after each turn
//! - [`GameStats`] - score and move counters
//! - [`SessionConfig`] - radius, spawn distribution and initial fill
//! - [`SpawnSeed`] - seed for deterministic tile spawning
//!
//! # Game Flow
//!
//! 1. Build a [`SessionConfig`] (or deserialize one) and create a [`GameSession`]
//! 2. The board is filled according to the configured [`FillPolicy`](crate::FillPolicy)
//! 3. Each [`GameSession::apply_move`] slides the board, spawns a tile if
//!    anything moved and returns a [`TurnResult`]
//! 4. Repeat until [`TurnResult::game_over`]: the board is full and no
//!    direction changes it
//!
//! # Example
//!
//! ```
//! use hexmerge_engine::{Direction, GameSession, SessionConfig, SpawnSeed};
//!
//! let mut session = GameSession::with_seed(SessionConfig::with_radius(2), SpawnSeed::from_u128(1))?;
//! let mut turns = 0;
//! while !session.is_game_over() && turns < 10_000 {
//!     let direction = Direction::ALL[turns % Direction::LEN];
//!     session.apply_move(direction);
//!     turns += 1;
//! }
//! println!("final score: {}", session.score());
//! # Ok::<(), hexmerge_engine::ConfigError>(())
//! ```

pub use self::{game_session::*, game_stats::*, session_config::*, spawn_seed::*};

mod game_session;
mod game_stats;
mod session_config;
mod spawn_seed;
