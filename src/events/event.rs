//! Board notifications.
//!
//! Each notification has its own payload type and its own channel on
//! [`BoardEvents`]. Every payload is also wrapped in [`BoardEvent`] and
//! republished on a single `all` channel, for observers that prefer one
//! ordered stream (a renderer replaying animations, a test recording
//! history).
//!
//! Payloads carry owned copies of whatever they describe. A listener sees
//! the board as it is at the moment of the notification, which may be in
//! the middle of a cascade.

use serde::{Deserialize, Serialize};

use super::channel::EventChannel;
use crate::board::Position;
use crate::cards::{Card, EquipmentType, ItemCard, Side};
use crate::core::entity::EntityId;

/// A card was placed onto an empty cell from the dungeon pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDealt {
    pub card: Card,
    pub position: Position,
}

/// A card changed cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMoved {
    pub card: EntityId,
    pub from: Position,
    pub to: Position,
}

/// A card left play for the discard pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDiscarded {
    pub card: Card,
}

/// A card on the board turned over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFlipped {
    pub card: EntityId,
    pub side: Side,
}

/// A deal pass found no card for an empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceLeftEmpty {
    pub position: Position,
}

/// The player stepped onto an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCollected {
    pub item: ItemCard,
}

/// The occupant of one equipment slot changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentChanged {
    pub monster: EntityId,
    pub slot: EquipmentType,

    /// The new occupant, `None` if the slot is now empty.
    pub item: Option<EntityId>,
}

/// A monster's active effects were added to or reduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectsChanged {
    pub monster: EntityId,
}

/// A monster died.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterDied {
    pub monster: EntityId,
    pub killed_by: String,
}

/// The player died. Terminal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDied {
    pub killed_by: String,
    pub turn: u32,
}

/// Any board notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum BoardEvent {
    CardDealt(CardDealt),
    CardMoved(CardMoved),
    CardDiscarded(CardDiscarded),
    CardFlipped(CardFlipped),
    SpaceLeftEmpty(SpaceLeftEmpty),
    ItemCollected(ItemCollected),
    EquipmentChanged(EquipmentChanged),
    EffectsChanged(EffectsChanged),
    MonsterDied(MonsterDied),
    PlayerDied(PlayerDied),
}

impl BoardEvent {
    /// Short stable name, used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::CardDealt(_) => "card_dealt",
            BoardEvent::CardMoved(_) => "card_moved",
            BoardEvent::CardDiscarded(_) => "card_discarded",
            BoardEvent::CardFlipped(_) => "card_flipped",
            BoardEvent::SpaceLeftEmpty(_) => "space_left_empty",
            BoardEvent::ItemCollected(_) => "item_collected",
            BoardEvent::EquipmentChanged(_) => "equipment_changed",
            BoardEvent::EffectsChanged(_) => "effects_changed",
            BoardEvent::MonsterDied(_) => "monster_died",
            BoardEvent::PlayerDied(_) => "player_died",
        }
    }
}

/// The board's notification channels.
///
/// Cloning yields handles to the same subscriber lists.
#[derive(Clone, Debug, Default)]
pub struct BoardEvents {
    pub card_dealt: EventChannel<CardDealt>,
    pub card_moved: EventChannel<CardMoved>,
    pub card_discarded: EventChannel<CardDiscarded>,
    pub card_flipped: EventChannel<CardFlipped>,
    pub space_left_empty: EventChannel<SpaceLeftEmpty>,
    pub item_collected: EventChannel<ItemCollected>,
    pub equipment_changed: EventChannel<EquipmentChanged>,
    pub effects_changed: EventChannel<EffectsChanged>,
    pub monster_died: EventChannel<MonsterDied>,
    pub player_died: EventChannel<PlayerDied>,

    /// Every notification, in emission order.
    pub all: EventChannel<BoardEvent>,
}

impl BoardEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish on the typed channel, then on `all`.
    pub fn emit(&self, event: BoardEvent) {
        match &event {
            BoardEvent::CardDealt(e) => self.card_dealt.publish(e),
            BoardEvent::CardMoved(e) => self.card_moved.publish(e),
            BoardEvent::CardDiscarded(e) => self.card_discarded.publish(e),
            BoardEvent::CardFlipped(e) => self.card_flipped.publish(e),
            BoardEvent::SpaceLeftEmpty(e) => self.space_left_empty.publish(e),
            BoardEvent::ItemCollected(e) => self.item_collected.publish(e),
            BoardEvent::EquipmentChanged(e) => self.equipment_changed.publish(e),
            BoardEvent::EffectsChanged(e) => self.effects_changed.publish(e),
            BoardEvent::MonsterDied(e) => self.monster_died.publish(e),
            BoardEvent::PlayerDied(e) => self.player_died.publish(e),
        }
        self.all.publish(&event);
    }
}
