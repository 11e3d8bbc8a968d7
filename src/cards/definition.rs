//! Card definitions - static card data from a deck definition.
//!
//! A `CardDefinition` names a card type ("Goblin", "Iron Helmet") and carries
//! exactly one of item or monster properties. Definitions are raw input:
//! numbers may be missing and equipment tags are unparsed strings, so that
//! validation can report exactly which card is malformed.
//!
//! Instance data (orientation, equipment, effects) lives on
//! [`Card`](super::Card).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Goblin"), not a specific
/// instance in a game. Zero means "missing".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check whether the id is the "missing" placeholder.
    #[must_use]
    pub const fn is_missing(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Equipment slot category. A monster holds at most one item per slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentType {
    Head,
    Body,
    Held,
    Offhand,
}

impl EquipmentType {
    /// Every slot, in display order.
    pub const ALL: [EquipmentType; 4] = [
        EquipmentType::Head,
        EquipmentType::Body,
        EquipmentType::Held,
        EquipmentType::Offhand,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EquipmentType::Head => "head",
            EquipmentType::Body => "body",
            EquipmentType::Held => "held",
            EquipmentType::Offhand => "offhand",
        }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no equipment slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown equipment type {0}")]
pub struct UnknownEquipmentType(pub String);

impl FromStr for EquipmentType {
    type Err = UnknownEquipmentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipmentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownEquipmentType(s.to_string()))
    }
}

/// An effect reference inside item properties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub id: String,
    #[serde(default)]
    pub amount: u32,
}

/// Item-specific properties.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProperties {
    /// Slots the item can fill. Empty means not equippable.
    #[serde(default)]
    pub equipment_types: Vec<String>,

    /// Combat bonus while equipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combat: Option<i32>,

    /// Effects applied when the item is used.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<EffectSpec>,
}

impl ItemProperties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equipment slot (builder pattern).
    #[must_use]
    pub fn with_equipment_type(mut self, equipment_type: EquipmentType) -> Self {
        self.equipment_types.push(equipment_type.as_str().to_string());
        self
    }

    /// Set the combat bonus (builder pattern).
    #[must_use]
    pub fn with_combat(mut self, combat: i32) -> Self {
        self.combat = Some(combat);
        self
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, id: impl Into<String>, amount: u32) -> Self {
        self.effects.push(EffectSpec {
            id: id.into(),
            amount,
        });
        self
    }
}

/// Monster-specific properties. Both stats are required.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterProperties {
    #[serde(default)]
    pub combat: Option<i32>,
    #[serde(default)]
    pub strength: Option<i32>,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use dungeon_deck::cards::{CardDefinition, CardId, EquipmentType, ItemProperties};
///
/// let helmet = CardDefinition::item(
///     CardId::new(3),
///     "Iron Helmet",
///     ItemProperties::new()
///         .with_equipment_type(EquipmentType::Head)
///         .with_combat(2),
/// );
/// let goblin = CardDefinition::monster(CardId::new(4), "Goblin", 1, 2);
///
/// assert!(helmet.item_properties.is_some());
/// assert!(goblin.monster_properties.is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    #[serde(default)]
    pub id: CardId,

    /// Card name (for display).
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_properties: Option<ItemProperties>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monster_properties: Option<MonsterProperties>,
}

impl CardDefinition {
    /// Create an item definition.
    #[must_use]
    pub fn item(id: CardId, name: impl Into<String>, properties: ItemProperties) -> Self {
        Self {
            id,
            name: name.into(),
            item_properties: Some(properties),
            monster_properties: None,
        }
    }

    /// Create a monster definition.
    #[must_use]
    pub fn monster(id: CardId, name: impl Into<String>, combat: i32, strength: i32) -> Self {
        Self {
            id,
            name: name.into(),
            item_properties: None,
            monster_properties: Some(MonsterProperties {
                combat: Some(combat),
                strength: Some(strength),
            }),
        }
    }
}
