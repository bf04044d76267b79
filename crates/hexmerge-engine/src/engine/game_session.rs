use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, InvalidDirectionError,
    core::{CellSnapshot, Direction, HexBoard, Resolution, Spawn, slide},
};

use super::{GameStats, SessionConfig, SpawnSeed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// What a renderer gets back after each turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Every cell of the board in row-major order.
    pub board: Vec<CellSnapshot>,
    /// Cumulative score.
    pub score: u64,
    pub game_over: bool,
    /// Score gained by this turn.
    pub score_delta: u64,
    /// Whether the move changed the board.
    pub moved: bool,
    /// The tile spawned after the move, if any.
    pub spawned: Option<Spawn>,
}

/// A single game: the authoritative board, score and terminal flag.
///
/// All mutation goes through [`Self::apply_move`]. A turn either resolves
/// completely or leaves the board and score as they were:
///
/// 1. Slide the board with [`slide::resolve`]
/// 2. If nothing moved, stop: no spawn, no score change
/// 3. Otherwise commit the new board, add the score and spawn one tile
/// 4. Re-evaluate game over: the board is full and no direction changes it
///
/// Once the game is over, further moves are no-ops.
///
/// # Example
///
/// ```
/// use hexmerge_engine::{Direction, GameSession, SessionConfig, SpawnSeed};
///
/// let seed = SpawnSeed::from_u128(42);
/// let mut session = GameSession::with_seed(SessionConfig::default(), seed)?;
/// assert_eq!(session.board().tiles().count(), 2);
///
/// for direction in Direction::ALL {
///     let turn = session.apply_move(direction);
///     if turn.game_over {
///         break;
///     }
/// }
/// assert_eq!(session.score(), session.stats().score());
/// # Ok::<(), hexmerge_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    seed: SpawnSeed,
    rng: Pcg32,
    board: HexBoard,
    stats: GameStats,
    session_state: SessionState,
}

impl GameSession {
    /// Starts a session with a random seed.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic spawning.
    pub fn with_seed(config: SessionConfig, seed: SpawnSeed) -> Result<Self, ConfigError> {
        let layout = config.validate()?;
        let mut rng = seed.rng();
        let mut board = HexBoard::new(layout);
        board.initialize(&mut rng, &config.spawn, &config.fill)?;
        Ok(Self::assemble(config, seed, rng, board))
    }

    /// Starts a session from a prepared board instead of the configured fill.
    pub fn from_board(
        config: SessionConfig,
        board: HexBoard,
        seed: SpawnSeed,
    ) -> Result<Self, ConfigError> {
        let layout = config.validate()?;
        if *board.layout() != layout {
            return Err(ConfigError::RadiusMismatch {
                expected: layout.radius(),
                actual: board.layout().radius(),
            });
        }
        let rng = seed.rng();
        Ok(Self::assemble(config, seed, rng, board))
    }

    fn assemble(config: SessionConfig, seed: SpawnSeed, rng: Pcg32, board: HexBoard) -> Self {
        let mut stats = GameStats::new();
        if let Some(tile) = board.max_tile() {
            stats.observe_tile(tile);
        }
        let mut this = Self {
            config,
            seed,
            rng,
            board,
            stats,
            session_state: SessionState::Playing,
        };
        this.update_state();
        this
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> SpawnSeed {
        self.seed
    }

    #[must_use]
    pub fn board(&self) -> &HexBoard {
        &self.board
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }

    /// Returns the current state without making a move.
    #[must_use]
    pub fn snapshot(&self) -> TurnResult {
        self.turn_result(0, false, None)
    }

    /// Plays one turn.
    pub fn apply_move(&mut self, direction: Direction) -> TurnResult {
        if self.is_game_over() {
            return self.snapshot();
        }

        let Resolution {
            board,
            score_delta,
            changed,
            merges,
        } = slide::resolve(&self.board, direction);
        if !changed {
            self.stats.reject_move();
            self.update_state();
            return self.snapshot();
        }

        self.board = board;
        // A changed move always leaves an empty cell, so this only fails on a bug.
        let spawned = self.board.spawn(&mut self.rng, &self.config.spawn).ok();
        self.stats
            .complete_move(direction, score_delta, merges.len(), spawned.is_some());
        for tile in merges.iter().map(|m| m.tile).chain(spawned.map(|s| s.tile)) {
            self.stats.observe_tile(tile);
        }
        self.update_state();
        self.turn_result(score_delta, true, spawned)
    }

    /// Parses `direction` and plays one turn.
    ///
    /// On a parse error the session is left untouched.
    pub fn try_apply_move(&mut self, direction: &str) -> Result<TurnResult, InvalidDirectionError> {
        let direction = direction.parse()?;
        Ok(self.apply_move(direction))
    }

    fn update_state(&mut self) {
        if self.board.is_full() && !slide::has_any_move(&self.board) {
            self.session_state = SessionState::GameOver;
        }
    }

    fn turn_result(&self, score_delta: u64, moved: bool, spawned: Option<Spawn>) -> TurnResult {
        TurnResult {
            board: self.board.snapshot(),
            score: self.score(),
            game_over: self.is_game_over(),
            score_delta,
            moved,
            spawned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FillPolicy, HexLayout, Pos, SpawnDistribution, SpawnWeight, Tile};

    const SEED: SpawnSeed = SpawnSeed::from_u128(0x5eed);

    fn config(radius: usize) -> SessionConfig {
        SessionConfig::with_radius(radius)
    }

    fn board(radius: usize, rows: &[&[u64]]) -> HexBoard {
        HexBoard::from_rows(HexLayout::new(radius).unwrap(), rows).unwrap()
    }

    fn empty_count(turn: &TurnResult) -> usize {
        turn.board.iter().filter(|c| c.value.is_none()).count()
    }

    #[test]
    fn test_new_session_sparse_start() {
        let session = GameSession::with_seed(config(3), SEED).unwrap();
        assert_eq!(session.board().tiles().count(), 2);
        assert_eq!(session.score(), 0);
        assert!(session.session_state().is_playing());
        assert_eq!(session.seed(), SEED);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert_eq!(
            GameSession::with_seed(config(1), SEED).unwrap_err(),
            ConfigError::RadiusTooSmall { radius: 1 }
        );
        let err = GameSession::from_board(config(3), HexBoard::new(HexLayout::new(2).unwrap()), SEED)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::RadiusMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = GameSession::with_seed(config(3), SEED).unwrap();
        let mut b = GameSession::with_seed(config(3), SEED).unwrap();
        for direction in Direction::ALL.into_iter().cycle().take(60) {
            assert_eq!(a.apply_move(direction), b.apply_move(direction));
        }
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_changed_move_spawns_and_scores() {
        let start = board(2, &[&[0, 0], &[2, 0, 2], &[0, 0]]);
        let mut session = GameSession::from_board(config(2), start, SEED).unwrap();
        let turn = session.apply_move(Direction::Right);
        assert!(turn.moved);
        assert_eq!(turn.score_delta, 4);
        assert_eq!(turn.score, 4);
        let spawned = turn.spawned.unwrap();
        assert_ne!(spawned.pos, Pos::new(1, 2));
        assert_eq!(session.board().tiles().count(), 2);
        assert_eq!(session.board().get(Pos::new(1, 2)).unwrap(), Some(Tile::FOUR));
        assert_eq!(session.stats().turns(), 1);
        assert_eq!(session.stats().merges(), 1);
        assert_eq!(session.stats().moves_in(Direction::Right), 1);
        assert!(!turn.game_over);
    }

    #[test]
    fn test_unchanged_move_does_not_spawn() {
        let start = board(
            3,
            &[
                &[0, 0, 2],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0, 0],
                &[0, 0, 0, 0],
                &[0, 0, 0],
            ],
        );
        let mut session = GameSession::from_board(config(3), start.clone(), SEED).unwrap();
        let before = empty_count(&session.snapshot());
        for direction in [Direction::Right, Direction::UpRight, Direction::UpLeft] {
            let turn = session.apply_move(direction);
            assert!(!turn.moved, "{direction}");
            assert_eq!(turn.spawned, None);
            assert_eq!(turn.score_delta, 0);
            assert_eq!(empty_count(&turn), before);
            assert!(!turn.game_over);
        }
        assert_eq!(session.board(), &start);
        assert_eq!(session.stats().rejected_moves(), 3);
        assert_eq!(session.stats().turns(), 0);
    }

    #[test]
    fn test_packed_dead_board_is_game_over() {
        let start = board(2, &[&[2, 4], &[8, 16, 32], &[64, 128]]);
        for direction in Direction::ALL {
            let mut session = GameSession::from_board(config(2), start.clone(), SEED).unwrap();
            let turn = session.apply_move(direction);
            assert!(turn.game_over, "{direction}");
            assert!(!turn.moved);
            assert_eq!(turn.score, 0);
            assert_eq!(session.board(), &start);
        }
    }

    #[test]
    fn test_full_board_with_merge_is_not_over() {
        let start = board(2, &[&[2, 2], &[8, 16, 32], &[64, 128]]);
        let mut session = GameSession::from_board(config(2), start, SEED).unwrap();
        assert!(!session.is_game_over());
        let turn = session.apply_move(Direction::UpLeft);
        assert!(!turn.moved);
        assert!(!turn.game_over);
        let turn = session.apply_move(Direction::Left);
        assert!(turn.moved);
        assert_eq!(turn.score_delta, 4);
        assert!(turn.spawned.is_some());
    }

    #[test]
    fn test_game_over_is_absorbing() {
        let start = board(2, &[&[2, 4], &[8, 16, 32], &[64, 128]]);
        let mut session = GameSession::from_board(config(2), start, SEED).unwrap();
        assert!(session.is_game_over());
        let turn = session.apply_move(Direction::Left);
        assert!(turn.game_over);
        assert_eq!(turn.score_delta, 0);
        assert_eq!(session.stats().rejected_moves(), 0);
    }

    #[test]
    fn test_try_apply_move() {
        let mut session = GameSession::with_seed(config(3), SEED).unwrap();
        let before = session.board().clone();
        let err = session.try_apply_move("sideways").unwrap_err();
        assert_eq!(err.input, "sideways");
        assert_eq!(session.board(), &before);
        assert_eq!(session.stats().turns(), 0);
        assert_eq!(session.stats().rejected_moves(), 0);
        assert!(session.try_apply_move("down-left").is_ok());
    }

    #[test]
    fn test_play_until_game_over() {
        let twos_and_fours = SessionConfig {
            radius: 2,
            spawn: SpawnDistribution::new([SpawnWeight::new(2, 1.0), SpawnWeight::new(4, 1.0)])
                .unwrap(),
            fill: FillPolicy::sparse(),
        };
        let mut session = GameSession::with_seed(twos_and_fours, SEED).unwrap();
        let mut last_score = 0;
        for turn in 0.. {
            let direction = Direction::ALL[turn % Direction::LEN];
            let result = session.apply_move(direction);
            assert!(result.score >= last_score);
            assert_eq!(result.score, last_score + result.score_delta);
            last_score = result.score;
            if result.game_over {
                assert!(session.board().is_full());
                break;
            }
            assert!(turn < 100_000, "game did not end");
        }
        assert_eq!(session.score(), session.stats().score());
    }
}
