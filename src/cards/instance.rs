//! Card instances - runtime card state.
//!
//! Every card shares a [`CardBase`] (identity and orientation) and carries a
//! kind-specific payload: [`ItemCard`] or [`MonsterCard`]. Capabilities such
//! as "can be equipped" or "can attack" are checks on the kind.
//!
//! Mutators here only change state and report whether anything changed;
//! the board decides which notifications to raise.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardId, EquipmentType};
use super::monster::MonsterCard;
use crate::core::entity::EntityId;
use crate::effects::{Effect, ModifierEffect};

/// Which face of a card is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Front,
    #[default]
    Back,
}

/// Identity and orientation shared by every card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBase {
    /// Unique entity ID for this instance.
    pub id: EntityId,

    /// Reference to the card definition.
    pub card_id: CardId,

    /// Display name.
    pub name: String,

    side: Side,
}

impl CardBase {
    #[must_use]
    pub fn new(id: EntityId, card_id: CardId, name: impl Into<String>, side: Side) -> Self {
        Self {
            id,
            card_id,
            name: name.into(),
            side,
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.side == Side::Front
    }

    /// Turn the card. Returns `true` only if the side actually changed.
    pub fn set_side(&mut self, side: Side) -> bool {
        let changed = self.side != side;
        self.side = side;
        changed
    }
}

/// An item: equipment, consumable, or both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCard {
    base: CardBase,
    equipment_types: SmallVec<[EquipmentType; 2]>,
    combat: i32,
    effects: Vec<Effect>,
}

impl ItemCard {
    #[must_use]
    pub fn new(
        base: CardBase,
        equipment_types: impl IntoIterator<Item = EquipmentType>,
        combat: i32,
        effects: Vec<Effect>,
    ) -> Self {
        let mut types: SmallVec<[EquipmentType; 2]> = SmallVec::new();
        for t in equipment_types {
            if !types.contains(&t) {
                types.push(t);
            }
        }
        Self {
            base,
            equipment_types: types,
            combat,
            effects,
        }
    }

    /// Create an item with no equipment slots.
    #[must_use]
    pub fn consumable(base: CardBase, effects: Vec<Effect>) -> Self {
        Self {
            base,
            equipment_types: SmallVec::new(),
            combat: 0,
            effects,
        }
    }

    #[must_use]
    pub fn base(&self) -> &CardBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut CardBase {
        &mut self.base
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.base.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.base.name
    }

    /// Slots this item fills when equipped.
    #[must_use]
    pub fn equipment_types(&self) -> &[EquipmentType] {
        &self.equipment_types
    }

    #[must_use]
    pub fn is_equippable(&self) -> bool {
        !self.equipment_types.is_empty()
    }

    /// Check if the item can fill `slot`.
    #[must_use]
    pub fn fills(&self, slot: EquipmentType) -> bool {
        self.equipment_types.contains(&slot)
    }

    /// Combat bonus granted while equipped.
    #[must_use]
    pub fn combat_bonus(&self) -> i32 {
        self.combat
    }

    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Persistent effects that apply to whoever equips this item.
    pub fn modifier_effects(&self) -> impl Iterator<Item = &ModifierEffect> {
        self.effects.iter().filter_map(Effect::as_modifier)
    }
}

/// A card on the board, in the dungeon, or in a discard pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Card {
    Item(ItemCard),
    Monster(MonsterCard),
}

impl Card {
    #[must_use]
    pub fn base(&self) -> &CardBase {
        match self {
            Card::Item(item) => item.base(),
            Card::Monster(monster) => monster.base(),
        }
    }

    pub fn base_mut(&mut self) -> &mut CardBase {
        match self {
            Card::Item(item) => item.base_mut(),
            Card::Monster(monster) => monster.base_mut(),
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.base().id
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.base().card_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.base().name
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.base().side()
    }

    /// Turn the card. Returns `true` only if the side actually changed.
    pub fn set_side(&mut self, side: Side) -> bool {
        self.base_mut().set_side(side)
    }

    #[must_use]
    pub fn as_item(&self) -> Option<&ItemCard> {
        match self {
            Card::Item(item) => Some(item),
            Card::Monster(_) => None,
        }
    }

    #[must_use]
    pub fn as_monster(&self) -> Option<&MonsterCard> {
        match self {
            Card::Monster(monster) => Some(monster),
            Card::Item(_) => None,
        }
    }

    pub fn as_monster_mut(&mut self) -> Option<&mut MonsterCard> {
        match self {
            Card::Monster(monster) => Some(monster),
            Card::Item(_) => None,
        }
    }

    #[must_use]
    pub fn is_item(&self) -> bool {
        matches!(self, Card::Item(_))
    }

    #[must_use]
    pub fn is_monster(&self) -> bool {
        matches!(self, Card::Monster(_))
    }

    /// Only items with at least one equipment slot can be equipped.
    #[must_use]
    pub fn is_equippable(&self) -> bool {
        self.as_item().is_some_and(ItemCard::is_equippable)
    }

    /// Only monsters fight.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.is_monster()
    }
}

impl From<ItemCard> for Card {
    fn from(item: ItemCard) -> Self {
        Card::Item(item)
    }
}

impl From<MonsterCard> for Card {
    fn from(monster: MonsterCard) -> Self {
        Card::Monster(monster)
    }
}
