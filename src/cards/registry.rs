//! Card registry for definition lookup and instantiation.
//!
//! The `CardRegistry` holds one validated [`CardTemplate`] per card
//! definition. Templates are built from raw [`CardDefinition`]s, which is
//! where per-card validation happens: a template only exists if its
//! definition is well formed.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::definition::{CardDefinition, CardId, EquipmentType};
use super::instance::{Card, CardBase, ItemCard, Side};
use super::monster::MonsterCard;
use crate::core::entity::EntityId;
use crate::deck::DeckError;
use crate::effects::{create_effect, Effect};

/// Kind-specific payload of a validated definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    Item {
        equipment_types: SmallVec<[EquipmentType; 2]>,
        combat: i32,
        effects: Vec<Effect>,
    },
    Monster {
        combat: i32,
        strength: i32,
    },
}

/// A validated card definition, ready to stamp out instances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardTemplate {
    pub id: CardId,
    pub name: String,
    pub kind: TemplateKind,
}

impl CardTemplate {
    #[must_use]
    pub fn is_item(&self) -> bool {
        matches!(self.kind, TemplateKind::Item { .. })
    }

    #[must_use]
    pub fn is_equippable(&self) -> bool {
        matches!(&self.kind, TemplateKind::Item { equipment_types, .. } if !equipment_types.is_empty())
    }

    /// Create a card instance with the given entity id and orientation.
    #[must_use]
    pub fn instantiate(&self, entity: EntityId, side: Side) -> Card {
        let base = CardBase::new(entity, self.id, self.name.clone(), side);
        match &self.kind {
            TemplateKind::Item {
                equipment_types,
                combat,
                effects,
            } => Card::Item(ItemCard::new(
                base,
                equipment_types.iter().copied(),
                *combat,
                effects.clone(),
            )),
            TemplateKind::Monster { combat, strength } => {
                Card::Monster(MonsterCard::new(base, *strength, *combat))
            }
        }
    }
}

impl TryFrom<&CardDefinition> for CardTemplate {
    type Error = DeckError;

    fn try_from(def: &CardDefinition) -> Result<Self, Self::Error> {
        if def.id.is_missing() {
            return Err(DeckError::MissingId);
        }
        if def.name.trim().is_empty() {
            return Err(DeckError::MissingName(def.id));
        }

        let kind = match (&def.item_properties, &def.monster_properties) {
            (Some(_), Some(_)) => return Err(DeckError::ConflictingProperties(def.id)),
            (None, None) => return Err(DeckError::MissingProperties(def.id)),
            (Some(item), None) => {
                let mut equipment_types = SmallVec::new();
                for tag in &item.equipment_types {
                    let parsed: EquipmentType =
                        tag.parse().map_err(|_| DeckError::UnknownEquipmentType {
                            card: def.id,
                            tag: tag.clone(),
                        })?;
                    equipment_types.push(parsed);
                }

                let effects = item
                    .effects
                    .iter()
                    .map(|spec| create_effect(&spec.id, &[spec.amount]))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|source| DeckError::InvalidEffect {
                        card: def.id,
                        source,
                    })?;

                TemplateKind::Item {
                    equipment_types,
                    combat: item.combat.unwrap_or(0),
                    effects,
                }
            }
            (None, Some(monster)) => {
                let strength = monster.strength.ok_or(DeckError::MissingMonsterStat {
                    card: def.id,
                    stat: "strength",
                })?;
                if strength <= 0 {
                    return Err(DeckError::NonPositiveStrength {
                        card: def.id,
                        strength,
                    });
                }
                TemplateKind::Monster {
                    combat: monster.combat.ok_or(DeckError::MissingMonsterStat {
                        card: def.id,
                        stat: "combat",
                    })?,
                    strength,
                }
            }
        };

        Ok(Self {
            id: def.id,
            name: def.name.clone(),
            kind,
        })
    }
}

/// Registry of validated card definitions.
///
/// ## Example
///
/// ```
/// use dungeon_deck::cards::{CardDefinition, CardId, CardRegistry, Side};
/// use dungeon_deck::core::EntityId;
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(&CardDefinition::monster(CardId::new(1), "Goblin", 1, 2))
///     .unwrap();
///
/// let goblin = registry
///     .instantiate(CardId::new(1), EntityId(5), Side::Back)
///     .unwrap();
/// assert_eq!(goblin.name(), "Goblin");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    templates: FxHashMap<CardId, CardTemplate>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a card definition.
    pub fn register(&mut self, def: &CardDefinition) -> Result<(), DeckError> {
        let template = CardTemplate::try_from(def)?;
        if self.templates.contains_key(&template.id) {
            return Err(DeckError::DuplicateCardDefinition(template.id));
        }
        self.templates.insert(template.id, template);
        Ok(())
    }

    /// Build a registry from a list of definitions.
    pub fn from_definitions<'a>(
        defs: impl IntoIterator<Item = &'a CardDefinition>,
    ) -> Result<Self, DeckError> {
        let mut registry = Self::new();
        for def in defs {
            registry.register(def)?;
        }
        Ok(registry)
    }

    /// Get a template by definition id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardTemplate> {
        self.templates.get(&id)
    }

    /// Get a template, failing if the id is unknown.
    pub fn template(&self, id: CardId) -> Result<&CardTemplate, DeckError> {
        self.get(id).ok_or(DeckError::UnknownCardDefinition(id))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.templates.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.values()
    }

    /// Create a card instance of definition `id`.
    pub fn instantiate(&self, id: CardId, entity: EntityId, side: Side) -> Result<Card, DeckError> {
        Ok(self.template(id)?.instantiate(entity, side))
    }

    /// Create an item instance, failing if `id` is a monster.
    pub fn instantiate_item(
        &self,
        id: CardId,
        entity: EntityId,
        side: Side,
    ) -> Result<ItemCard, DeckError> {
        match self.instantiate(id, entity, side)? {
            Card::Item(item) => Ok(item),
            Card::Monster(_) => Err(DeckError::NotAnItem(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::definition::{ItemProperties, MonsterProperties};

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry
            .register(&CardDefinition::monster(CardId::new(1), "Goblin", 1, 2))
            .unwrap();

        assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Goblin");
        assert!(registry.get(CardId::new(99)).is_none());
        assert_eq!(
            registry.template(CardId::new(99)),
            Err(DeckError::UnknownCardDefinition(CardId::new(99)))
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = CardRegistry::new();
        registry
            .register(&CardDefinition::monster(CardId::new(1), "Goblin", 1, 2))
            .unwrap();

        assert_eq!(
            registry.register(&CardDefinition::monster(CardId::new(1), "Orc", 2, 3)),
            Err(DeckError::DuplicateCardDefinition(CardId::new(1)))
        );
    }

    #[test]
    fn test_missing_id_and_name() {
        let no_id = CardDefinition::monster(CardId::new(0), "Ghost", 1, 1);
        assert_eq!(CardTemplate::try_from(&no_id), Err(DeckError::MissingId));

        let no_name = CardDefinition::monster(CardId::new(2), "  ", 1, 1);
        assert_eq!(
            CardTemplate::try_from(&no_name),
            Err(DeckError::MissingName(CardId::new(2)))
        );
    }

    #[test]
    fn test_property_kind_rules() {
        let mut both = CardDefinition::monster(CardId::new(3), "Mimic", 2, 2);
        both.item_properties = Some(ItemProperties::new());
        assert_eq!(
            CardTemplate::try_from(&both),
            Err(DeckError::ConflictingProperties(CardId::new(3)))
        );

        let neither = CardDefinition {
            id: CardId::new(4),
            name: "Nothing".to_string(),
            ..CardDefinition::default()
        };
        assert_eq!(
            CardTemplate::try_from(&neither),
            Err(DeckError::MissingProperties(CardId::new(4)))
        );
    }

    #[test]
    fn test_missing_monster_stat() {
        let mut def = CardDefinition::monster(CardId::new(5), "Slime", 1, 1);
        def.monster_properties = Some(MonsterProperties {
            combat: Some(1),
            strength: None,
        });
        assert_eq!(
            CardTemplate::try_from(&def),
            Err(DeckError::MissingMonsterStat {
                card: CardId::new(5),
                stat: "strength"
            })
        );
    }

    #[test]
    fn test_monster_needs_positive_strength() {
        for strength in [0, -2] {
            let def = CardDefinition::monster(CardId::new(8), "Wisp", 1, strength);
            assert_eq!(
                CardTemplate::try_from(&def),
                Err(DeckError::NonPositiveStrength {
                    card: CardId::new(8),
                    strength
                })
            );
        }
    }

    #[test]
    fn test_unknown_equipment_type() {
        let mut props = ItemProperties::new();
        props.equipment_types.push("tail".to_string());
        let def = CardDefinition::item(CardId::new(6), "Tail Ring", props);

        assert_eq!(
            CardTemplate::try_from(&def),
            Err(DeckError::UnknownEquipmentType {
                card: CardId::new(6),
                tag: "tail".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_effect() {
        let def = CardDefinition::item(
            CardId::new(7),
            "Strange Brew",
            ItemProperties::new().with_effect("poison", 1),
        );

        let err = CardTemplate::try_from(&def).unwrap_err();
        assert!(matches!(err, DeckError::InvalidEffect { card, .. } if card == CardId::new(7)));
    }

    #[test]
    fn test_instantiate_item() {
        let registry = CardRegistry::from_definitions(&[
            CardDefinition::item(
                CardId::new(1),
                "Helmet",
                ItemProperties::new()
                    .with_equipment_type(EquipmentType::Head)
                    .with_combat(2),
            ),
            CardDefinition::monster(CardId::new(2), "Goblin", 1, 2),
        ])
        .unwrap();

        let helmet = registry
            .instantiate_item(CardId::new(1), EntityId(10), Side::Front)
            .unwrap();
        assert_eq!(helmet.id(), EntityId(10));
        assert_eq!(helmet.combat_bonus(), 2);
        assert!(helmet.base().is_face_up());

        assert_eq!(
            registry.instantiate_item(CardId::new(2), EntityId(11), Side::Front),
            Err(DeckError::NotAnItem(CardId::new(2)))
        );
    }
}
