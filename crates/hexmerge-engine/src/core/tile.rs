use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A numbered tile on the board.
///
/// Tiles always carry a power of two starting at 2. The value is stored as
/// its base-2 exponent, so `Tile` is one byte and doubling is an increment.
///
/// Serialized as its plain value (`2`, `4`, `8`, ...).
///
/// # Example
///
/// ```
/// use hexmerge_engine::Tile;
///
/// let tile = Tile::from_value(8).unwrap();
/// assert_eq!(tile.exponent(), 3);
/// assert_eq!(tile.doubled().value(), 16);
/// assert!(Tile::from_value(6).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile {
    exponent: u8,
}

impl Tile {
    pub const TWO: Self = Self { exponent: 1 };
    pub const FOUR: Self = Self { exponent: 2 };

    /// Largest representable exponent (`2^63` fits in `u64`).
    pub const MAX_EXPONENT: u8 = 63;

    #[must_use]
    pub const fn from_exponent(exponent: u8) -> Option<Self> {
        if exponent == 0 || exponent > Self::MAX_EXPONENT {
            return None;
        }
        Some(Self { exponent })
    }

    /// Returns the tile for `value`, or `None` unless it is a power of two >= 2.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_value(value: u64) -> Option<Self> {
        if value < 2 || !value.is_power_of_two() {
            return None;
        }
        Some(Self {
            exponent: value.trailing_zeros() as u8,
        })
    }

    #[must_use]
    pub const fn exponent(self) -> u8 {
        self.exponent
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        1 << self.exponent
    }

    /// Whether two copies of `self` may merge. Tiles at
    /// [`Self::MAX_EXPONENT`] stay as they are.
    #[must_use]
    pub const fn can_merge(self) -> bool {
        self.exponent < Self::MAX_EXPONENT
    }

    /// Returns the tile produced by merging two copies of `self`.
    ///
    /// Saturates at [`Self::MAX_EXPONENT`]; the move engine never merges
    /// such tiles, see [`Self::can_merge`].
    #[must_use]
    pub const fn doubled(self) -> Self {
        if self.exponent >= Self::MAX_EXPONENT {
            return self;
        }
        Self {
            exponent: self.exponent + 1,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.value())
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u64::deserialize(deserializer)?;
        Self::from_value(value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid tile value: {value} (expected a power of two >= 2)"
            ))
        })
    }
}

/// A single cell of the backing grid.
///
/// Cells outside the hexagon hold [`Cell::Wall`] from construction on and
/// are never rewritten. Cells inside hold either [`Cell::Empty`] or a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Tile(Tile),
}

impl Cell {
    #[must_use]
    pub const fn tile(self) -> Option<Tile> {
        match self {
            Cell::Tile(tile) => Some(tile),
            Cell::Empty | Cell::Wall => None,
        }
    }
}

impl From<Option<Tile>> for Cell {
    fn from(tile: Option<Tile>) -> Self {
        tile.map_or(Cell::Empty, Cell::Tile)
    }
}
