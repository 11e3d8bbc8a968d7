//! Deck configuration errors.

use thiserror::Error;

use crate::cards::CardId;
use crate::effects::EffectError;

/// A malformed deck definition. Every variant names the offending card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("card definition is missing an id")]
    MissingId,
    #[error("card {0} has no name")]
    MissingName(CardId),
    #[error("card {card} has unknown equipment type {tag}")]
    UnknownEquipmentType { card: CardId, tag: String },
    #[error("card {0} has both item and monster properties")]
    ConflictingProperties(CardId),
    #[error("card {0} has neither item nor monster properties")]
    MissingProperties(CardId),
    #[error("card {card} is missing monster {stat}")]
    MissingMonsterStat { card: CardId, stat: &'static str },
    #[error("card instance {0} needs a positive quantity")]
    InvalidQuantity(CardId),
    #[error("no card definition for {0}")]
    UnknownCardDefinition(CardId),
    #[error("card definition {0} is defined twice")]
    DuplicateCardDefinition(CardId),
    #[error("card {card} has an invalid effect: {source}")]
    InvalidEffect {
        card: CardId,
        #[source]
        source: EffectError,
    },
    #[error("card {0} cannot be equipped")]
    NotEquippable(CardId),
    #[error("card {0} is not an item")]
    NotAnItem(CardId),
    #[error("monster {card} needs positive strength, got {strength}")]
    NonPositiveStrength { card: CardId, strength: i32 },
    #[error("starting gear {0} leaves the player dead")]
    LethalStartingGear(CardId),
}
