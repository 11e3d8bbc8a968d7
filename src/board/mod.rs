//! The 3x3 grid and its rules.
//!
//! - `Position`: a (column, row) cell and orthogonal adjacency
//! - `Board`: dealing, movement, combat resolution, cascade, discard pile

#[allow(clippy::module_inception)]
mod board;
mod position;

pub use board::{Board, BoardSnapshot, MoveOutcome};
pub use position::Position;
