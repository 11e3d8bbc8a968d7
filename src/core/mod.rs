//! Core engine types: entity ids, RNG, configuration, errors.
//!
//! Everything here is independent of the board rules; the rest of the crate
//! builds on these.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{EntityId, IdAllocator};
pub use rng::GameRng;
pub use config::{GameConfig, BOARD_COLUMNS, BOARD_ROWS, BOARD_SIZE};
pub use error::EngineError;
