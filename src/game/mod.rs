//! Game composition: the hand and the `Game` root that wires it to the
//! board.

#[allow(clippy::module_inception)]
mod game;
mod hand;

pub use game::Game;
pub use hand::Hand;
