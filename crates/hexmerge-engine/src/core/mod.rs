//! Pure board data structures and algorithms.
//!
//! - [`HexLayout`] - maps the hexagon onto a square backing grid and back
//! - [`Direction`] - the six axial move directions
//! - [`HexBoard`] - the cell matrix with validity-checked access
//! - [`SpawnDistribution`] / [`FillPolicy`] - how new tiles are drawn
//! - [`resolve`] - the move-and-merge algorithm
//!
//! Nothing in this module owns session state or a random source; callers
//! pass the generator in explicitly.

pub use self::{direction::*, hex_board::*, hex_layout::*, slide::*, spawn::*, tile::*};

pub(crate) mod direction;
pub(crate) mod hex_board;
pub(crate) mod hex_layout;
pub(crate) mod slide;
pub(crate) mod spawn;
pub(crate) mod tile;
