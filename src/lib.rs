//! # dungeon-deck
//!
//! Game-state engine for a single-player dungeon-crawler card game played
//! on a 3x3 grid.
//!
//! The player's card sits on the board among cards dealt from a shuffled
//! dungeon pile. Each move steps the player onto a neighbouring cell,
//! collecting the item or fighting the monster found there; the cards
//! behind slide up and the gaps are refilled from the pile.
//!
//! ## Design Principles
//!
//! 1. **Cards Are Data**: cards only hold state and report what changed.
//!    The board decides what that means and raises notifications.
//!
//! 2. **Synchronous Notifications**: every change is announced on an
//!    [`events::EventChannel`] inside the call that caused it. There is no
//!    scheduler and no I/O.
//!
//! 3. **Validate Up Front**: deck definitions are checked completely before
//!    any game state exists. Afterwards, errors only signal caller mistakes.
//!
//! 4. **Deterministic**: the dungeon shuffle is seeded and ids come from an
//!    explicit allocator, so the same deck and seed replay identically.
//!
//! ## Modules
//!
//! - `core`: Entity ids, RNG, configuration, errors
//! - `events`: Publish/subscribe channels and board notifications
//! - `effects`: Modifier and one-time effects
//! - `cards`: Card definitions, instances, combat and equipment
//! - `deck`: Deck definitions and validation
//! - `board`: Grid positions and the board rules
//! - `game`: Hand and the game composition root

pub mod core;
pub mod events;
pub mod effects;
pub mod cards;
pub mod deck;
pub mod board;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    EntityId, IdAllocator,
    GameRng,
    GameConfig, BOARD_COLUMNS, BOARD_ROWS, BOARD_SIZE,
    EngineError,
};

pub use crate::events::{
    EventChannel, SubscriptionId,
    BoardEvent, BoardEvents,
    CardDealt, CardMoved, CardDiscarded, CardFlipped, SpaceLeftEmpty,
    ItemCollected, EquipmentChanged, EffectsChanged, MonsterDied, PlayerDied,
};

pub use crate::effects::{
    create_effect, Affected, Effect, EffectError,
    ModifierEffect, ModifierKind, OneTimeEffect, OneTimeKind,
};

pub use crate::cards::{
    CardId, CardDefinition, EquipmentType, ItemProperties, MonsterProperties, EffectSpec,
    Card, CardBase, ItemCard, MonsterCard, Side, LifeState,
    CardRegistry, CardTemplate,
};

pub use crate::deck::{CardInstanceDefinition, DeckDefinition, DeckError};

pub use crate::board::{Board, BoardSnapshot, MoveOutcome, Position};

pub use crate::game::{Game, Hand};
