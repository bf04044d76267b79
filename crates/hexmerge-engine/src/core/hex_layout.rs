use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

use super::direction::Direction;

/// Coordinates of a cell in the square backing grid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The valid columns of one backing-grid row.
///
/// The cells of a row that belong to the hexagon always form one contiguous
/// range. `left_trim` and `right_trim` count the masked-out cells on either
/// side, relative to the full row width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowSpan {
    pub row: usize,
    pub start: usize,
    pub end: usize,
    pub left_trim: usize,
    pub right_trim: usize,
}

impl RowSpan {
    #[must_use]
    pub fn columns(&self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.end - self.start
    }
}

/// Maps a hexagon of a given radius onto a square backing grid.
///
/// # Layout
///
/// For radius `R` the backing grid is `D × D` with `D = 2R - 1`. A cell
/// `(row, col)` is part of the board iff
///
/// ```text
/// R - 1 <= row + col <= 3R - 3
/// ```
///
/// which trims the top-left and bottom-right corners off the square and
/// leaves `3R(R - 1) + 1` cells. For `R = 3`:
///
/// ```text
///     col 0 1 2 3 4
/// row 0   . . # # #
/// row 1   . # # # #
/// row 2   # # # # #
/// row 3   # # # # .
/// row 4   # # # . .
/// ```
///
/// Drawn with each row shifted by half a cell per trimmed cell, this is a
/// regular hexagon with 3, 4, 5, 4, 3 cells per row. Neighbors follow the
/// axial steps of [`Direction`].
///
/// # Example
///
/// ```
/// use hexmerge_engine::{Direction, HexLayout, Pos};
///
/// let layout = HexLayout::new(3)?;
/// assert_eq!(layout.dim(), 5);
/// assert_eq!(layout.cell_count(), 19);
/// assert!(!layout.contains(Pos::new(0, 0)));
/// assert_eq!(layout.neighbor(Pos::new(2, 2), Direction::UpRight), Some(Pos::new(1, 3)));
/// # Ok::<(), hexmerge_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexLayout {
    radius: usize,
}

impl HexLayout {
    pub const MIN_RADIUS: usize = 2;
    /// Largest supported radius: a `2047 × 2047` backing grid.
    pub const MAX_RADIUS: usize = 1024;

    pub fn new(radius: usize) -> Result<Self, ConfigError> {
        if radius < Self::MIN_RADIUS {
            return Err(ConfigError::RadiusTooSmall { radius });
        }
        if radius > Self::MAX_RADIUS {
            return Err(ConfigError::RadiusTooLarge {
                radius,
                max: Self::MAX_RADIUS,
            });
        }
        Ok(Self { radius })
    }

    #[must_use]
    pub const fn radius(&self) -> usize {
        self.radius
    }

    /// Width and height of the backing grid.
    #[must_use]
    pub const fn dim(&self) -> usize {
        2 * self.radius - 1
    }

    /// Number of cells inside the hexagon (the centered hexagonal number).
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        3 * self.radius * (self.radius - 1) + 1
    }

    const fn min_diagonal(&self) -> usize {
        self.radius - 1
    }

    const fn max_diagonal(&self) -> usize {
        3 * self.radius - 3
    }

    #[must_use]
    pub const fn contains(&self, pos: Pos) -> bool {
        let dim = self.dim();
        if pos.row >= dim || pos.col >= dim {
            return false;
        }
        let diagonal = pos.row + pos.col;
        self.min_diagonal() <= diagonal && diagonal <= self.max_diagonal()
    }

    /// Flat index of `pos` in a row-major `dim × dim` buffer, if it is on the board.
    pub(crate) fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.dim() + pos.col)
    }

    #[must_use]
    pub fn row_span(&self, row: usize) -> Option<RowSpan> {
        let dim = self.dim();
        if row >= dim {
            return None;
        }
        let start = self.min_diagonal().saturating_sub(row);
        let end = usize::min(dim, self.max_diagonal() + 1 - row);
        Some(RowSpan {
            row,
            start,
            end,
            left_trim: start,
            right_trim: dim - end,
        })
    }

    pub fn row_spans(&self) -> impl Iterator<Item = RowSpan> + '_ {
        (0..self.dim()).filter_map(|row| self.row_span(row))
    }

    /// Iterates over every cell of the board in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.row_spans()
            .flat_map(|span| span.columns().map(move |col| Pos::new(span.row, col)))
    }

    /// Returns the cell one step from `pos` in `direction`, if it is on the board.
    #[must_use]
    pub fn neighbor(&self, pos: Pos, direction: Direction) -> Option<Pos> {
        let (d_row, d_col) = direction.step();
        let next = Pos::new(
            pos.row.checked_add_signed(d_row)?,
            pos.col.checked_add_signed(d_col)?,
        );
        self.contains(next).then_some(next)
    }

    /// Splits the board into the lines that tiles slide along for `direction`.
    ///
    /// Each line is a maximal run of collinear cells on the direction's axis,
    /// ordered far end first: the first cell is the one a tile reaches last
    /// when moving in `direction`. Every cell belongs to exactly one line.
    #[must_use]
    pub fn lines(&self, direction: Direction) -> Vec<Vec<Pos>> {
        let back = direction.opposite();
        self.cells()
            .filter(|&pos| self.neighbor(pos, direction).is_none())
            .map(|head| {
                let mut line = vec![head];
                let mut current = head;
                while let Some(prev) = self.neighbor(current, back) {
                    line.push(prev);
                    current = prev;
                }
                line
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_too_small() {
        assert_eq!(
            HexLayout::new(1),
            Err(ConfigError::RadiusTooSmall { radius: 1 })
        );
        assert!(HexLayout::new(0).is_err());
        assert!(HexLayout::new(2).is_ok());
    }

    #[test]
    fn test_radius_too_large() {
        let max = HexLayout::MAX_RADIUS;
        assert_eq!(HexLayout::new(max).unwrap().cell_count(), 3 * max * (max - 1) + 1);
        for radius in [max + 1, 1 << 40, usize::MAX] {
            assert_eq!(
                HexLayout::new(radius),
                Err(ConfigError::RadiusTooLarge { radius, max })
            );
        }
    }

    #[test]
    fn test_cell_count_is_centered_hexagonal_number() {
        for radius in 2..=8 {
            let layout = HexLayout::new(radius).unwrap();
            let expected = 3 * radius * (radius - 1) + 1;
            assert_eq!(layout.cell_count(), expected);
            assert_eq!(layout.cells().count(), expected, "radius {radius}");
        }
        assert_eq!(HexLayout::new(2).unwrap().cells().count(), 7);
        assert_eq!(HexLayout::new(3).unwrap().cells().count(), 19);
    }

    #[test]
    fn test_cells_match_predicate() {
        let layout = HexLayout::new(4).unwrap();
        let dim = layout.dim();
        let from_predicate: Vec<_> = (0..dim)
            .flat_map(|row| (0..dim).map(move |col| Pos::new(row, col)))
            .filter(|&pos| layout.contains(pos))
            .collect();
        let enumerated: Vec<_> = layout.cells().collect();
        assert_eq!(enumerated, from_predicate);
    }

    #[test]
    fn test_row_spans_radius_3() {
        let layout = HexLayout::new(3).unwrap();
        let spans: Vec<_> = layout
            .row_spans()
            .map(|s| (s.start, s.end, s.left_trim, s.right_trim))
            .collect();
        assert_eq!(
            spans,
            [(2, 5, 2, 0), (1, 5, 1, 0), (0, 5, 0, 0), (0, 4, 0, 1), (0, 3, 0, 2)]
        );
        let counts: Vec<_> = layout.row_spans().map(|s| s.cell_count()).collect();
        assert_eq!(counts, [3, 4, 5, 4, 3]);
        assert_eq!(layout.row_span(5), None);
    }

    #[test]
    fn test_contains_out_of_range() {
        let layout = HexLayout::new(3).unwrap();
        assert!(!layout.contains(Pos::new(5, 0)));
        assert!(!layout.contains(Pos::new(0, 5)));
        assert!(!layout.contains(Pos::new(1, 0)));
        assert!(!layout.contains(Pos::new(4, 3)));
        assert!(layout.contains(Pos::new(2, 0)));
        assert!(layout.contains(Pos::new(4, 2)));
    }

    #[test]
    fn test_neighbor_edges() {
        let layout = HexLayout::new(3).unwrap();
        let center = Pos::new(2, 2);
        for dir in Direction::ALL {
            let next = layout.neighbor(center, dir).unwrap();
            assert_eq!(layout.neighbor(next, dir.opposite()), Some(center));
        }
        assert_eq!(layout.neighbor(Pos::new(0, 2), Direction::UpLeft), None);
        assert_eq!(layout.neighbor(Pos::new(0, 2), Direction::Left), None);
        assert_eq!(layout.neighbor(Pos::new(0, 2), Direction::DownLeft), Some(Pos::new(1, 1)));
        assert_eq!(layout.neighbor(Pos::new(4, 0), Direction::DownRight), None);
    }

    #[test]
    fn test_center_has_six_neighbors_on_every_radius() {
        for radius in 2..=6 {
            let layout = HexLayout::new(radius).unwrap();
            let center = Pos::new(radius - 1, radius - 1);
            let count = Direction::ALL
                .iter()
                .filter(|&&dir| layout.neighbor(center, dir).is_some())
                .count();
            assert_eq!(count, 6);
        }
    }

    #[test]
    fn test_lines_partition_board() {
        for radius in 2..=5 {
            let layout = HexLayout::new(radius).unwrap();
            for dir in Direction::ALL {
                let lines = layout.lines(dir);
                assert_eq!(lines.len(), layout.dim(), "radius {radius} {dir}");
                let mut all: Vec<_> = lines.iter().flatten().copied().collect();
                all.sort();
                let mut expected: Vec<_> = layout.cells().collect();
                expected.sort();
                assert_eq!(all, expected);
            }
        }
    }

    #[test]
    fn test_lines_far_end_first() {
        let layout = HexLayout::new(3).unwrap();
        let lines = layout.lines(Direction::DownRight);
        let column_2 = lines.iter().find(|line| line[0].col == 2).unwrap();
        let rows: Vec<_> = column_2.iter().map(|pos| pos.row).collect();
        assert_eq!(rows, [4, 3, 2, 1, 0]);

        let lines = layout.lines(Direction::Left);
        let row_0 = lines.iter().find(|line| line[0].row == 0).unwrap();
        let cols: Vec<_> = row_0.iter().map(|pos| pos.col).collect();
        assert_eq!(cols, [2, 3, 4]);
    }
}
