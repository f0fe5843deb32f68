//! Grid snapshots and the move engine.
//!
//! ## Key Types
//!
//! - `Grid`: immutable square snapshot of the board
//! - `GridEngine`: initializes grids and applies moves
//! - `MoveOutcome`: everything one move did (grid, score, win, loss, events)

pub mod board;
pub mod engine;
pub mod outcome;

pub use board::{EmptyCells, Grid};
pub use engine::{merge_points, scan_order, GridEngine};
pub use outcome::{Merge, MoveOutcome, Slide, SlideResult, Spawn, WinEvent};
