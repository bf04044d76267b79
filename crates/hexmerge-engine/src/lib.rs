//! Board engine for a tile-merge puzzle played on a hexagonal lattice.
//!
//! - [`core`] holds the pure parts: the hex coordinate layout, the board
//!   matrix, the tile spawn distribution and the move-and-merge resolver.
//! - [`engine`] holds the session that owns the authoritative board and
//!   score and drives one turn at a time.
//!
//! # Example
//!
//! ```
//! use hexmerge_engine::{Direction, GameSession, SessionConfig};
//!
//! let mut session = GameSession::new(SessionConfig::default())?;
//! let turn = session.apply_move(Direction::Left);
//! println!("score: {}, game over: {}", turn.score, turn.game_over);
//! # Ok::<(), hexmerge_engine::ConfigError>(())
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A move command that does not name one of the six directions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "invalid direction {input:?} (expected left, right, up-left, up-right, down-left or down-right)"
)]
pub struct InvalidDirectionError {
    #[error(not(source))]
    pub input: String,
}

/// Errors raised by reads and writes on a [`HexBoard`].
///
/// None of these leave the board partially modified.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("cell {pos} is outside the board")]
    OutOfBoard { pos: Pos },
    #[display("{value} is not a cell value (expected 0 or a power of two >= 2)")]
    InvalidValue { value: u64 },
    #[display("no empty cell left to spawn a tile")]
    BoardFull,
    #[display("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[display("row {row} has {actual} cells, expected {expected}")]
    RowShape {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Invalid session configuration, reported once at construction.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("radius must be at least 2, got {radius}")]
    RadiusTooSmall { radius: usize },
    #[display("radius must be at most {max}, got {radius}")]
    RadiusTooLarge { radius: usize, max: usize },
    #[display("spawn distribution has no entries")]
    EmptyDistribution,
    #[display("spawn weight for tile {value} must be finite and non-negative, got {weight}")]
    InvalidWeight { value: u64, weight: f64 },
    #[display("spawn weights must not all be zero")]
    ZeroTotalWeight,
    #[display("spawn weights must have a finite sum")]
    TotalWeightOverflow,
    #[display("spawn value {value} is not a power of two >= 2")]
    InvalidTileValue { value: u64 },
    #[display("cannot place {tiles} initial tiles on a board of {cells} cells")]
    TooManyInitialTiles { tiles: usize, cells: usize },
    #[display("empty weight must be finite and non-negative, got {weight}")]
    InvalidEmptyWeight { weight: f64 },
    #[display("board radius {actual} does not match configured radius {expected}")]
    RadiusMismatch { expected: usize, actual: usize },
}
