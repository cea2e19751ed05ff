//! Keyboard input
//!
//! Provides an action-based layer over the macroquad keyboard. Systems never
//! read keys directly; `main` takes one `InputSnapshot` per frame.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
