use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    direction::Direction,
    hex_board::HexBoard,
    hex_layout::Pos,
    tile::Tile,
};

/// A tile created by merging two equal tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    /// Where the merged tile ends up.
    pub pos: Pos,
    /// The merged (doubled) tile.
    pub tile: Tile,
}

/// Outcome of sliding a board in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The board after the move. Equal to the input when `changed` is false.
    pub board: HexBoard,
    /// Sum of the values of all merged tiles, saturating at `u64::MAX`.
    pub score_delta: u64,
    /// Whether any cell differs from the input board.
    pub changed: bool,
    pub merges: Vec<Merge>,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    tile: Tile,
    merged: bool,
}

/// Packs the tiles of one line toward its far end.
///
/// `tiles` yields the non-empty tiles far end first. A tile merges with the
/// slot in front of it only if both are equal and that slot was not itself
/// produced by a merge in this pass.
fn compress<I>(tiles: I) -> Vec<Slot>
where
    I: IntoIterator<Item = Tile>,
{
    let mut slots: Vec<Slot> = vec![];
    for tile in tiles {
        match slots.last_mut() {
            Some(last) if !last.merged && last.tile == tile && tile.can_merge() => {
                last.tile = tile.doubled();
                last.merged = true;
            }
            _ => slots.push(Slot {
                tile,
                merged: false,
            }),
        }
    }
    slots
}

/// Slides every tile of `board` as far as possible in `direction`.
///
/// The board is split into the lines of
/// [`HexLayout::lines`](super::HexLayout::lines). Within each line tiles are
/// packed toward the far end in their original order, and two adjacent
/// equal tiles merge into one of double value. A tile takes part in at most
/// one merge per move, so `[2, 2, 2, 2]` becomes `[4, 4]`, not `[8]`.
/// Tiles at [`Tile::MAX_EXPONENT`] never merge.
///
/// The input board is not modified.
///
/// # Example
///
/// ```
/// use hexmerge_engine::{Direction, HexBoard, HexLayout, Pos, resolve};
///
/// let layout = HexLayout::new(2)?;
/// let board = HexBoard::from_rows(layout, &[&[0, 0], &[2, 0, 2], &[0, 0]])?;
/// let result = resolve(&board, Direction::Right);
/// assert!(result.changed);
/// assert_eq!(result.score_delta, 4);
/// assert_eq!(result.board.get(Pos::new(1, 2))?.map(|t| t.value()), Some(4));
/// assert_eq!(board.get(Pos::new(1, 0))?.map(|t| t.value()), Some(2));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn resolve(board: &HexBoard, direction: Direction) -> Resolution {
    let mut next = board.clone();
    let mut score_delta: u64 = 0;
    let mut merges = vec![];

    for line in board.layout().lines(direction) {
        let slots = compress(line.iter().filter_map(|&pos| board.tile_at(pos)));
        for (i, &pos) in line.iter().enumerate() {
            let slot = slots.get(i);
            next.put(pos, slot.map(|s| s.tile));
            if let Some(&Slot { tile, merged: true }) = slot {
                score_delta = score_delta.saturating_add(tile.value());
                merges.push(Merge { pos, tile });
            }
        }
    }

    let changed = next != *board;
    Resolution {
        board: next,
        score_delta,
        changed,
        merges,
    }
}

/// Returns whether moving in `direction` would change the board.
///
/// Same answer as `resolve(board, direction).changed` without building the
/// new board.
#[must_use]
pub fn can_move(board: &HexBoard, direction: Direction) -> bool {
    board.layout().lines(direction).iter().any(|line| {
        let mut seen_empty = false;
        let mut previous = None;
        for &pos in line {
            match board.tile_at(pos) {
                None => seen_empty = true,
                Some(tile) => {
                    if seen_empty || (previous == Some(tile) && tile.can_merge()) {
                        return true;
                    }
                    previous = Some(tile);
                }
            }
        }
        false
    })
}

/// Directions that would change the board, in [`Direction::ALL`] order.
#[must_use]
pub fn legal_moves(board: &HexBoard) -> ArrayVec<Direction, { Direction::LEN }> {
    Direction::ALL
        .into_iter()
        .filter(|&direction| can_move(board, direction))
        .collect()
}

#[must_use]
pub fn has_any_move(board: &HexBoard) -> bool {
    Direction::ALL
        .into_iter()
        .any(|direction| can_move(board, direction))
}
