//! The player's hand: items carried but not equipped.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::cards::{EquipmentType, ItemCard};
use crate::core::entity::EntityId;
use crate::core::error::EngineError;

/// Item cards keyed by entity id.
#[derive(Clone, Debug, Default)]
pub struct Hand {
    cards: FxHashMap<EntityId, ItemCard>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, returning any entry it replaced.
    pub fn add_card(&mut self, item: ItemCard) -> Option<ItemCard> {
        let id = item.id();
        let previous = self.cards.insert(id, item);
        if previous.is_some() {
            warn!(card = %id, "replaced hand entry with the same id");
        }
        previous
    }

    pub fn remove_card(&mut self, id: EntityId) -> Option<ItemCard> {
        self.cards.remove(&id)
    }

    #[must_use]
    pub fn get_card(&self, id: EntityId) -> Option<&ItemCard> {
        self.cards.get(&id)
    }

    /// Look up an item that must be in the hand.
    pub fn card(&self, id: EntityId) -> Result<&ItemCard, EngineError> {
        self.get_card(id).ok_or(EngineError::CardNotFound(id))
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Items in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemCard> {
        let mut items: Vec<_> = self.cards.values().collect();
        items.sort_by_key(|item| item.id());
        items.into_iter()
    }

    /// Items that can fill `slot`, in id order.
    #[must_use]
    pub fn equippable_for(&self, slot: EquipmentType) -> Vec<&ItemCard> {
        self.iter().filter(|item| item.fills(slot)).collect()
    }
}
