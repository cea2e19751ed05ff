//! World module - tile-grid levels
//!
//! Level files are RON grids of tile codes. `level` validates them into a
//! `TileMap`; `spawn` turns the map into a `Scene`.

mod level;
mod spawn;

pub use level::*;
pub use spawn::*;
