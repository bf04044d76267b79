use serde::{Deserialize, Serialize};

use crate::core::{Direction, Tile};

/// Statistics tracked over a game session.
///
/// - **Score**: sum of the values of all merged tiles
/// - **Turns**: moves that changed the board
/// - **Rejected moves**: moves that left the board as it was (no spawn)
/// - **Merges** / **spawned tiles**: totals over all turns
/// - **Max tile**: largest tile seen on the board, including the initial fill
/// - **Direction counter**: accepted moves per direction, indexed by
///   [`Direction::index`]
///
/// # Example
///
/// ```
/// use hexmerge_engine::{Direction, GameStats, Tile};
///
/// let mut stats = GameStats::new();
/// stats.complete_move(Direction::Left, 8, 2, true);
/// stats.observe_tile(Tile::from_value(4).unwrap());
/// stats.reject_move();
///
/// assert_eq!(stats.score(), 8);
/// assert_eq!(stats.turns(), 1);
/// assert_eq!(stats.rejected_moves(), 1);
/// assert_eq!(stats.moves_in(Direction::Left), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: u64,
    turns: usize,
    rejected_moves: usize,
    merges: usize,
    spawned_tiles: usize,
    max_tile: Option<Tile>,
    direction_counter: [usize; Direction::LEN],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            turns: 0,
            rejected_moves: 0,
            merges: 0,
            spawned_tiles: 0,
            max_tile: None,
            direction_counter: [0; Direction::LEN],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn turns(&self) -> usize {
        self.turns
    }

    #[must_use]
    pub const fn rejected_moves(&self) -> usize {
        self.rejected_moves
    }

    #[must_use]
    pub const fn merges(&self) -> usize {
        self.merges
    }

    #[must_use]
    pub const fn spawned_tiles(&self) -> usize {
        self.spawned_tiles
    }

    #[must_use]
    pub const fn max_tile(&self) -> Option<Tile> {
        self.max_tile
    }

    #[must_use]
    pub const fn direction_counter(&self) -> &[usize; Direction::LEN] {
        &self.direction_counter
    }

    #[must_use]
    pub const fn moves_in(&self, direction: Direction) -> usize {
        self.direction_counter[direction.index()]
    }

    /// Records a move that changed the board. The score saturates at
    /// `u64::MAX`.
    ///
    /// # Arguments
    ///
    /// * `score_delta` - Sum of the merged tile values of the move
    /// * `merges` - Number of merges in the move
    /// * `spawned` - Whether a tile was spawned afterwards
    pub const fn complete_move(
        &mut self,
        direction: Direction,
        score_delta: u64,
        merges: usize,
        spawned: bool,
    ) {
        self.turns += 1;
        self.score = self.score.saturating_add(score_delta);
        self.merges += merges;
        if spawned {
            self.spawned_tiles += 1;
        }
        self.direction_counter[direction.index()] += 1;
    }

    /// Records a move that did not change the board.
    pub const fn reject_move(&mut self) {
        self.rejected_moves += 1;
    }

    /// Raises the max tile to `tile` if it is larger.
    pub fn observe_tile(&mut self, tile: Tile) {
        self.max_tile = self.max_tile.max(Some(tile));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.turns(), 0);
        assert_eq!(stats.max_tile(), None);
        assert_eq!(stats.direction_counter(), &[0; 6]);
        assert_eq!(stats, GameStats::default());
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = GameStats::new();
        stats.complete_move(Direction::UpRight, 4, 1, true);
        stats.complete_move(Direction::UpRight, 0, 0, false);
        stats.complete_move(Direction::DownLeft, 16, 2, true);
        stats.reject_move();
        assert_eq!(stats.score(), 20);
        assert_eq!(stats.turns(), 3);
        assert_eq!(stats.merges(), 3);
        assert_eq!(stats.spawned_tiles(), 2);
        assert_eq!(stats.rejected_moves(), 1);
        assert_eq!(stats.direction_counter(), &[0, 0, 0, 2, 1, 0]);
    }

    #[test]
    fn test_score_saturates() {
        let mut stats = GameStats::new();
        stats.complete_move(Direction::Left, u64::MAX - 1, 1, true);
        stats.complete_move(Direction::Left, 4, 1, true);
        assert_eq!(stats.score(), u64::MAX);
    }

    #[test]
    fn test_observe_tile_keeps_max() {
        let mut stats = GameStats::new();
        stats.observe_tile(Tile::FOUR);
        stats.observe_tile(Tile::TWO);
        assert_eq!(stats.max_tile(), Some(Tile::FOUR));
    }

    #[test]
    fn test_serde_shape() {
        let mut stats = GameStats::new();
        stats.complete_move(Direction::Left, 4, 1, true);
        stats.observe_tile(Tile::FOUR);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["score"], 4);
        assert_eq!(json["max_tile"], 4);
        assert_eq!(json["direction_counter"][0], 1);
    }
}
