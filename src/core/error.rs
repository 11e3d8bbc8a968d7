//! Engine error taxonomy.
//!
//! - Configuration errors ([`DeckError`], [`EffectError`]) are detected
//!   eagerly while building a game and are fatal.
//! - Invariant violations (everything else here) mean the caller asked for
//!   something that cannot exist: a missing card, an off-board position, an
//!   illegal move.
//!
//! Expected absence ("is there a card here?") is never an error; those
//! lookups return `Option`.

use thiserror::Error;

use super::entity::EntityId;
use crate::board::Position;
use crate::deck::DeckError;
use crate::effects::EffectError;

/// Errors raised by board, hand and game commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no card for id {0}")]
    CardNotFound(EntityId),
    #[error("no card at position {0}")]
    NoCardAtPosition(Position),
    #[error("position {0} is off the board")]
    PositionOutOfBounds(Position),
    #[error("card {0} has no equipment type")]
    NotEquippable(EntityId),
    #[error("card {0} is not an item")]
    NotAnItem(EntityId),
    #[error("card {0} is equipment and cannot be used up")]
    NotConsumable(EntityId),
    #[error("card {0} cannot be moved")]
    CardNotMovable(EntityId),
    #[error("cannot move from {from} to {to}")]
    IllegalMove { from: Position, to: Position },
    #[error("the game is over")]
    GameOver,
    #[error("player must start with positive strength, got {0}")]
    NonPositivePlayerStrength(i32),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Effect(#[from] EffectError),
}
