//! Deck definitions: the logical shape a game is built from.
//!
//! A deck lists the card definitions, how many of each go into the dungeon
//! pile and the starting hand, and which definitions the player starts
//! with equipped. How a deck is fetched or encoded is up to the host; the
//! serde derives accept the usual camelCase JSON shape.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::DeckError;
use crate::cards::{CardDefinition, CardId, CardRegistry};

/// A (definition id, quantity) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstanceDefinition {
    #[serde(default)]
    pub id: CardId,
    #[serde(default)]
    pub quantity: u32,
}

impl CardInstanceDefinition {
    #[must_use]
    pub const fn new(id: CardId, quantity: u32) -> Self {
        Self { id, quantity }
    }
}

/// A complete deck definition.
///
/// ## Example
///
/// ```
/// use dungeon_deck::cards::{CardDefinition, CardId, EquipmentType, ItemProperties};
/// use dungeon_deck::deck::DeckDefinition;
///
/// let deck = DeckDefinition::new()
///     .with_card(CardDefinition::monster(CardId::new(1), "Goblin", 1, 2))
///     .with_card(CardDefinition::item(
///         CardId::new(2),
///         "Dagger",
///         ItemProperties::new().with_equipment_type(EquipmentType::Held).with_combat(1),
///     ))
///     .with_dungeon_cards(CardId::new(1), 6)
///     .with_equipped(CardId::new(2));
///
/// let registry = deck.validate().unwrap();
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDefinition {
    #[serde(default)]
    pub card_defs: Vec<CardDefinition>,
    #[serde(default)]
    pub dungeon_cards: Vec<CardInstanceDefinition>,
    #[serde(default)]
    pub hand_cards: Vec<CardInstanceDefinition>,
    #[serde(default)]
    pub equipped_card_ids: Vec<CardId>,
}

impl DeckDefinition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card definition (builder pattern).
    #[must_use]
    pub fn with_card(mut self, def: CardDefinition) -> Self {
        self.card_defs.push(def);
        self
    }

    /// Put `quantity` copies of `id` into the dungeon pile (builder pattern).
    #[must_use]
    pub fn with_dungeon_cards(mut self, id: CardId, quantity: u32) -> Self {
        self.dungeon_cards.push(CardInstanceDefinition::new(id, quantity));
        self
    }

    /// Put `quantity` copies of `id` into the starting hand (builder pattern).
    #[must_use]
    pub fn with_hand_cards(mut self, id: CardId, quantity: u32) -> Self {
        self.hand_cards.push(CardInstanceDefinition::new(id, quantity));
        self
    }

    /// Start the player with `id` equipped (builder pattern).
    #[must_use]
    pub fn with_equipped(mut self, id: CardId) -> Self {
        self.equipped_card_ids.push(id);
        self
    }

    /// Total number of cards in the dungeon pile.
    #[must_use]
    pub fn dungeon_size(&self) -> u32 {
        self.dungeon_cards.iter().map(|c| c.quantity).sum()
    }

    /// Validate the whole deck, returning the registry of its definitions.
    ///
    /// Checks, in order: every card definition, then every dungeon and hand
    /// entry, then every equipped id. The first problem found is returned.
    pub fn validate(&self) -> Result<CardRegistry, DeckError> {
        let registry = CardRegistry::from_definitions(&self.card_defs)?;

        for entry in self.dungeon_cards.iter().chain(&self.hand_cards) {
            if entry.quantity == 0 {
                return Err(DeckError::InvalidQuantity(entry.id));
            }
            registry.template(entry.id)?;
        }

        for entry in &self.hand_cards {
            if !registry.template(entry.id)?.is_item() {
                return Err(DeckError::NotAnItem(entry.id));
            }
        }

        for &id in &self.equipped_card_ids {
            if !registry.template(id)?.is_equippable() {
                return Err(DeckError::NotEquippable(id));
            }
        }

        debug!(
            definitions = registry.len(),
            dungeon = self.dungeon_size(),
            "validated deck"
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{EquipmentType, ItemProperties};

    fn base_deck() -> DeckDefinition {
        DeckDefinition::new()
            .with_card(CardDefinition::monster(CardId::new(1), "Goblin", 1, 2))
            .with_card(CardDefinition::item(
                CardId::new(2),
                "Helmet",
                ItemProperties::new()
                    .with_equipment_type(EquipmentType::Head)
                    .with_combat(2),
            ))
            .with_card(CardDefinition::item(
                CardId::new(3),
                "Bread",
                ItemProperties::new().with_effect("food", 3),
            ))
    }

    #[test]
    fn test_valid_deck() {
        let deck = base_deck()
            .with_dungeon_cards(CardId::new(1), 5)
            .with_dungeon_cards(CardId::new(3), 4)
            .with_hand_cards(CardId::new(3), 1)
            .with_equipped(CardId::new(2));

        assert_eq!(deck.dungeon_size(), 9);
        assert!(deck.validate().is_ok());
    }

    #[test]
    fn test_zero_quantity() {
        let deck = base_deck().with_dungeon_cards(CardId::new(1), 0);
        assert_eq!(
            deck.validate().unwrap_err(),
            DeckError::InvalidQuantity(CardId::new(1))
        );
    }

    #[test]
    fn test_unknown_instance_id() {
        let deck = base_deck().with_hand_cards(CardId::new(42), 1);
        assert_eq!(
            deck.validate().unwrap_err(),
            DeckError::UnknownCardDefinition(CardId::new(42))
        );
    }

    #[test]
    fn test_monster_in_hand() {
        let deck = base_deck().with_hand_cards(CardId::new(1), 1);
        assert_eq!(
            deck.validate().unwrap_err(),
            DeckError::NotAnItem(CardId::new(1))
        );
    }

    #[test]
    fn test_equipping_consumable() {
        let deck = base_deck().with_equipped(CardId::new(3));
        assert_eq!(
            deck.validate().unwrap_err(),
            DeckError::NotEquippable(CardId::new(3))
        );
    }

    #[test]
    fn test_deck_from_json() {
        let json = r#"{
            "cardDefs": [
                { "id": 1, "name": "Goblin", "monsterProperties": { "combat": 1, "strength": 2 } },
                { "id": 2, "name": "Helmet", "itemProperties": { "equipmentTypes": ["head"], "combat": 2 } }
            ],
            "dungeonCards": [{ "id": 1, "quantity": 8 }],
            "handCards": [],
            "equippedCardIds": [2]
        }"#;

        let deck: DeckDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(deck.dungeon_size(), 8);
        assert_eq!(deck.equipped_card_ids, vec![CardId::new(2)]);
        assert!(deck.validate().is_ok());
    }

    #[test]
    fn test_missing_quantity_in_json() {
        let json = r#"{
            "cardDefs": [{ "id": 1, "name": "Goblin", "monsterProperties": { "combat": 1, "strength": 2 } }],
            "dungeonCards": [{ "id": 1 }]
        }"#;

        let deck: DeckDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(
            deck.validate().unwrap_err(),
            DeckError::InvalidQuantity(CardId::new(1))
        );
    }
}
