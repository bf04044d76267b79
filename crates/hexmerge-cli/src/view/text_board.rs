use std::fmt;

use crossterm::style::{Color, Stylize as _};
use hexmerge_engine::{CellSnapshot, HexLayout, TurnResult};

/// Width of the field rows are centered in.
const FIELD_WIDTH: usize = 50;
const MIN_CELL_WIDTH: usize = 5;

/// Plain text rendering of a turn.
///
/// Each row of the hexagon is shifted right by half a cell per masked-out
/// cell, so the rows line up as a hexagon:
///
/// ```text
///                      2     .
///                   .     4     .
///                      8     .
///
///                 Your score is: 0
/// ```
///
/// Empty cells are drawn as `.`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextBoard<'a> {
    layout: &'a HexLayout,
    turn: &'a TurnResult,
    color: bool,
}

impl<'a> TextBoard<'a> {
    pub(crate) fn new(layout: &'a HexLayout, turn: &'a TurnResult, color: bool) -> Self {
        Self {
            layout,
            turn,
            color,
        }
    }

    /// Cell width fitting the widest value. Always odd, so that half a cell
    /// plus separator is a whole number of columns.
    fn cell_width(&self) -> usize {
        let widest = self
            .turn
            .board
            .iter()
            .filter_map(|cell| cell.value)
            .map(|value| value.to_string().len())
            .max()
            .unwrap_or(0);
        widest.max(MIN_CELL_WIDTH) | 1
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text
        }
    }
}

fn format_cell(cell: &CellSnapshot, width: usize) -> String {
    match cell.value {
        Some(value) => format!("{value:^width$}"),
        None => format!("{:^width$}", "."),
    }
}

impl fmt::Display for TextBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dim = self.layout.dim();
        let width = self.cell_width();
        let pitch = width + 1;
        let margin = FIELD_WIDTH.saturating_sub(dim * pitch - 1) / 2;

        for cells in self.turn.board.chunk_by(|a, b| a.row == b.row) {
            let trimmed = dim - cells.len();
            let indent = margin + trimmed * pitch / 2;
            let row = cells
                .iter()
                .map(|cell| format_cell(cell, width))
                .collect::<Vec<_>>()
                .join(" ");
            let line = format!("{:indent$}{}", "", row.trim_end());
            writeln!(f, "{}", self.paint(line, Color::Green))?;
        }

        writeln!(f)?;
        let score = format!("Your score is: {}", self.turn.score);
        let line = format!("{score:^FIELD_WIDTH$}").trim_end().to_owned();
        writeln!(f, "{}", self.paint(line, Color::Blue))
    }
}
