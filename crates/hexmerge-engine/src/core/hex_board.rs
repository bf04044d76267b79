use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{BoardError, ConfigError};

use super::{
    hex_layout::{HexLayout, Pos},
    spawn::{FillPolicy, SpawnDistribution},
    tile::{Cell, Tile},
};

/// One visible cell as handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub row: usize,
    pub col: usize,
    /// `None` for an empty cell.
    pub value: Option<u64>,
}

/// A tile placed by [`HexBoard::spawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub pos: Pos,
    pub tile: Tile,
}

/// The cell matrix of a hexagonal board.
///
/// The board is stored as the full `D × D` backing grid of its
/// [`HexLayout`]. Cells outside the hexagon hold [`Cell::Wall`] from
/// construction on; every public accessor rejects them with
/// [`BoardError::OutOfBoard`], so a wall is never read as a value nor
/// overwritten.
///
/// # Example
///
/// ```
/// use hexmerge_engine::{HexBoard, HexLayout, Pos, Tile};
///
/// let mut board = HexBoard::new(HexLayout::new(2)?);
/// board.set(Pos::new(1, 1), 4)?;
/// assert_eq!(board.get(Pos::new(1, 1))?, Some(Tile::FOUR));
/// assert!(board.get(Pos::new(0, 0)).is_err());
/// assert_eq!(board.empty_count(), 6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexBoard {
    layout: HexLayout,
    cells: Vec<Cell>,
}

impl HexBoard {
    /// Creates a board with every cell empty.
    #[must_use]
    pub fn new(layout: HexLayout) -> Self {
        let dim = layout.dim();
        let cells = (0..dim * dim)
            .map(|i| {
                if layout.contains(Pos::new(i / dim, i % dim)) {
                    Cell::Empty
                } else {
                    Cell::Wall
                }
            })
            .collect();
        Self { layout, cells }
    }

    /// Builds a board from the values of each row, `0` meaning empty.
    ///
    /// `rows[i]` lists the cells of row `i` from left to right, so its length
    /// must equal the row's [`RowSpan::cell_count`](super::RowSpan::cell_count).
    ///
    /// ```
    /// use hexmerge_engine::{HexBoard, HexLayout, Pos};
    ///
    /// let layout = HexLayout::new(2)?;
    /// let board = HexBoard::from_rows(layout, &[&[2, 0], &[0, 4, 0], &[8, 0]])?;
    /// assert_eq!(board.get(Pos::new(0, 1))?.map(|t| t.value()), Some(2));
    /// assert_eq!(board.get(Pos::new(2, 0))?.map(|t| t.value()), Some(8));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_rows(layout: HexLayout, rows: &[&[u64]]) -> Result<Self, BoardError> {
        if rows.len() != layout.dim() {
            return Err(BoardError::RowCount {
                expected: layout.dim(),
                actual: rows.len(),
            });
        }
        let mut board = Self::new(layout);
        for (span, values) in layout.row_spans().zip(rows) {
            if values.len() != span.cell_count() {
                return Err(BoardError::RowShape {
                    row: span.row,
                    expected: span.cell_count(),
                    actual: values.len(),
                });
            }
            for (col, &value) in span.columns().zip(values.iter()) {
                board.set(Pos::new(span.row, col), value)?;
            }
        }
        Ok(board)
    }

    #[must_use]
    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    fn index(&self, pos: Pos) -> Result<usize, BoardError> {
        self.layout.index(pos).ok_or(BoardError::OutOfBoard { pos })
    }

    pub fn get(&self, pos: Pos) -> Result<Option<Tile>, BoardError> {
        let i = self.index(pos)?;
        Ok(self.cells[i].tile())
    }

    /// Writes a raw value: `0` empties the cell, a power of two >= 2 places a tile.
    pub fn set(&mut self, pos: Pos, value: u64) -> Result<(), BoardError> {
        let i = self.index(pos)?;
        let tile = match value {
            0 => None,
            _ => Some(Tile::from_value(value).ok_or(BoardError::InvalidValue { value })?),
        };
        self.cells[i] = Cell::from(tile);
        Ok(())
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Option<Tile>) -> Result<(), BoardError> {
        let i = self.index(pos)?;
        self.cells[i] = Cell::from(tile);
        Ok(())
    }

    /// Reads a cell known to be on the board. Walls read as `None`.
    pub(crate) fn tile_at(&self, pos: Pos) -> Option<Tile> {
        self.layout.index(pos).and_then(|i| self.cells[i].tile())
    }

    /// Writes a cell known to be on the board. Positions off the board are ignored.
    pub(crate) fn put(&mut self, pos: Pos, tile: Option<Tile>) {
        debug_assert!(self.layout.contains(pos), "{pos} is outside the board");
        if let Some(i) = self.layout.index(pos) {
            self.cells[i] = Cell::from(tile);
        }
    }

    /// Returns every cell of the hexagon in row-major order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CellSnapshot> {
        self.layout
            .cells()
            .map(|pos| CellSnapshot {
                row: pos.row,
                col: pos.col,
                value: self.tile_at(pos).map(Tile::value),
            })
            .collect()
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Pos, Tile)> + '_ {
        self.layout
            .cells()
            .filter_map(|pos| self.tile_at(pos).map(|tile| (pos, tile)))
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.layout
            .cells()
            .filter(|&pos| self.tile_at(pos).is_none())
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.empty_cells().count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.empty_cells().next().is_none()
    }

    #[must_use]
    pub fn max_tile(&self) -> Option<Tile> {
        self.tiles().map(|(_, tile)| tile).max()
    }

    /// Sum of all tile values on the board.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.tiles().map(|(_, tile)| tile.value()).sum()
    }

    /// Empties every cell of the hexagon.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            if !cell.is_wall() {
                *cell = Cell::Empty;
            }
        }
    }

    /// Places one tile on an empty cell chosen uniformly at random.
    ///
    /// The value is drawn from `distribution`. Fails with
    /// [`BoardError::BoardFull`] (leaving the board untouched) when no cell
    /// is empty.
    pub fn spawn<R>(
        &mut self,
        rng: &mut R,
        distribution: &SpawnDistribution,
    ) -> Result<Spawn, BoardError>
    where
        R: Rng + ?Sized,
    {
        let empty: Vec<Pos> = self.empty_cells().collect();
        if empty.is_empty() {
            return Err(BoardError::BoardFull);
        }
        let pos = empty[rng.random_range(0..empty.len())];
        let tile = distribution.sample(rng);
        self.put(pos, Some(tile));
        Ok(Spawn { pos, tile })
    }

    /// Clears the board and fills it according to `policy`.
    pub fn initialize<R>(
        &mut self,
        rng: &mut R,
        distribution: &SpawnDistribution,
        policy: &FillPolicy,
    ) -> Result<(), ConfigError>
    where
        R: Rng + ?Sized,
    {
        policy.validate(&self.layout)?;
        self.clear();
        match *policy {
            FillPolicy::Sparse { tiles } => {
                for _ in 0..tiles {
                    if self.spawn(rng, distribution).is_err() {
                        break;
                    }
                }
            }
            FillPolicy::Dense { empty_weight } => {
                let cells: Vec<Pos> = self.layout.cells().collect();
                for pos in cells {
                    let tile = distribution.sample_or_empty(rng, empty_weight);
                    self.put(pos, tile);
                }
            }
        }
        Ok(())
    }
}
