use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::InvalidDirectionError;

/// One of the six directions tiles can be shifted in.
///
/// Each direction is a unit step `(d_row, d_col)` in the axial coordinates of
/// [`HexLayout`](super::HexLayout). Rows run top to bottom; moving up a row
/// keeps the column for the left-hand neighbor and adds one for the
/// right-hand neighbor, moving down is the mirror image.
///
/// ```text
///      UpLeft   UpRight
///  Left     (cell)     Right
///    DownLeft   DownRight
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("up-left")]
    UpLeft,
    #[display("up-right")]
    UpRight,
    #[display("down-left")]
    DownLeft,
    #[display("down-right")]
    DownRight,
}

impl Direction {
    pub const LEN: usize = 6;

    pub const ALL: [Self; Self::LEN] = [
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Axial step `(d_row, d_col)` of one move in this direction.
    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::UpLeft => (-1, 0),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
        }
    }

    /// Position of this direction in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::UpLeft => 2,
            Direction::UpRight => 3,
            Direction::DownLeft => 4,
            Direction::DownRight => 5,
        }
    }
}

/// Parses a direction name.
///
/// Case, `-`, `_` and spaces are ignored, so `up-left`, `UpLeft` and
/// `up_left` are all accepted.
impl FromStr for Direction {
    type Err = InvalidDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let direction = match normalized.as_str() {
            "left" => Direction::Left,
            "right" => Direction::Right,
            "upleft" => Direction::UpLeft,
            "upright" => Direction::UpRight,
            "downleft" => Direction::DownLeft,
            "downright" => Direction::DownRight,
            _ => {
                return Err(InvalidDirectionError {
                    input: s.to_owned(),
                });
            }
        };
        Ok(direction)
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirectionError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| InvalidDirectionError {
                input: index.to_string(),
            })
    }
}
