//! Monster cards: combat stats, equipment slots, active effects, life state.
//!
//! The player's own card is a monster too.
//!
//! ## Derived stats
//!
//! - combat = intrinsic combat + equipped combat bonuses + modifier combat deltas
//! - strength = intrinsic strength + modifier strength deltas, counting the
//!   monster's own effects and those carried by its equipment
//!
//! A monster dies the moment its derived strength drops to zero or below.
//! Death is recorded with the name of whatever caused it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::EquipmentType;
use super::instance::{CardBase, ItemCard};
use crate::core::entity::EntityId;
use crate::core::error::EngineError;
use crate::effects::{remove_from, stack_into, Affected, ModifierEffect, ModifierKind};

/// Whether a monster is still in play.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    Dead {
        killed_by: String,
    },
}

/// Result of [`MonsterCard::set_equipment`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EquipOutcome {
    /// Items pushed out of the slots the new item needs.
    pub displaced: Vec<ItemCard>,

    /// Every slot whose occupant changed, one entry per slot.
    pub changed: SmallVec<[EquipmentType; 4]>,
}

/// Result of [`MonsterCard::attack`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Fatigue gained by the attacker, if the exchange was not a clean win.
    pub fatigue: Option<u32>,

    /// Whether the attacker died from that fatigue.
    pub attacker_died: bool,
}

/// A monster card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterCard {
    base: CardBase,
    strength: i32,
    combat: i32,
    equipment: SmallVec<[ItemCard; 4]>,
    active_effects: Vec<ModifierEffect>,
    life: LifeState,
}

impl MonsterCard {
    #[must_use]
    pub fn new(base: CardBase, strength: i32, combat: i32) -> Self {
        let mut monster = Self {
            base,
            strength,
            combat,
            equipment: SmallVec::new(),
            active_effects: Vec::new(),
            life: LifeState::Alive,
        };
        let name = monster.base.name.clone();
        monster.refresh_life(&name);
        monster
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

    #[must_use]
    pub fn intrinsic_strength(&self) -> i32 {
        self.strength
    }

    #[must_use]
    pub fn intrinsic_combat(&self) -> i32 {
        self.combat
    }

    fn all_modifiers(&self) -> impl Iterator<Item = &ModifierEffect> {
        self.active_effects
            .iter()
            .chain(self.equipment.iter().flat_map(ItemCard::modifier_effects))
    }

    /// Derived strength.
    #[must_use]
    pub fn strength(&self) -> i32 {
        self.all_modifiers()
            .map(ModifierEffect::strength_delta)
            .fold(self.strength, i32::saturating_add)
    }

    /// Derived combat.
    #[must_use]
    pub fn combat(&self) -> i32 {
        self.equipment
            .iter()
            .map(ItemCard::combat_bonus)
            .chain(self.all_modifiers().map(ModifierEffect::combat_delta))
            .fold(self.combat, i32::saturating_add)
    }

    /// The item occupying `slot`, if any.
    #[must_use]
    pub fn equipment(&self, slot: EquipmentType) -> Option<&ItemCard> {
        self.equipment.iter().find(|item| item.fills(slot))
    }

    /// Every equipped item.
    pub fn equipped(&self) -> impl Iterator<Item = &ItemCard> {
        self.equipment.iter()
    }

    /// Equip `item`, displacing whatever occupies any of its slots.
    ///
    /// Fails if the item declares no equipment type.
    pub fn set_equipment(&mut self, item: ItemCard) -> Result<EquipOutcome, EngineError> {
        if !item.is_equippable() {
            return Err(EngineError::NotEquippable(item.id()));
        }

        let mut outcome = EquipOutcome::default();
        for &slot in item.equipment_types() {
            if let Some(old) = self.take_equipment(slot) {
                // A displaced two-slot item frees its other slot as well.
                for &freed in old.equipment_types() {
                    if !item.fills(freed) && !outcome.changed.contains(&freed) {
                        outcome.changed.push(freed);
                    }
                }
                outcome.displaced.push(old);
            }
        }
        for &slot in item.equipment_types() {
            if !outcome.changed.contains(&slot) {
                outcome.changed.push(slot);
            }
        }

        let source = item.name().to_string();
        self.equipment.push(item);
        self.refresh_life(&source);
        Ok(outcome)
    }

    /// Detach and return the item in `slot`.
    pub fn remove_equipment(&mut self, slot: EquipmentType) -> Option<ItemCard> {
        let removed = self.take_equipment(slot)?;
        self.refresh_life(removed.name());
        Some(removed)
    }

    fn take_equipment(&mut self, slot: EquipmentType) -> Option<ItemCard> {
        let index = self.equipment.iter().position(|item| item.fills(slot))?;
        Some(self.equipment.remove(index))
    }

    /// The active modifier of `kind`, if any.
    #[must_use]
    pub fn active_effect(&self, kind: ModifierKind) -> Option<&ModifierEffect> {
        self.active_effects.iter().find(|e| e.kind() == kind)
    }

    #[must_use]
    pub fn life(&self) -> &LifeState {
        &self.life
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        matches!(self.life, LifeState::Dead { .. })
    }

    /// Name of whatever killed this monster.
    #[must_use]
    pub fn killed_by(&self) -> Option<&str> {
        match &self.life {
            LifeState::Dead { killed_by } => Some(killed_by),
            LifeState::Alive => None,
        }
    }

    /// Mark the monster dead. Returns `false` if it already was.
    pub fn kill(&mut self, killer: &str) -> bool {
        if self.is_dead() {
            return false;
        }
        self.life = LifeState::Dead {
            killed_by: killer.to_string(),
        };
        true
    }

    /// Fight `target`. The target always dies, killed by this monster.
    ///
    /// Unless this monster's combat strictly exceeds the target's, it also
    /// gains fatigue equal to the target's strength.
    pub fn attack(&mut self, target: &mut MonsterCard) -> Result<AttackOutcome, EngineError> {
        let defender_strength = target.strength();
        let clean_win = self.combat() > target.combat();

        target.life = LifeState::Dead {
            killed_by: self.name().to_string(),
        };

        let mut fatigue = None;
        if !clean_win && defender_strength > 0 {
            let amount = defender_strength.unsigned_abs();
            self.add_active_effect(ModifierEffect::fatigue(amount)?, target.name());
            fatigue = Some(amount);
        }

        Ok(AttackOutcome {
            fatigue,
            attacker_died: self.is_dead(),
        })
    }

    fn refresh_life(&mut self, source: &str) {
        if self.strength() <= 0 {
            self.kill(source);
        }
    }
}

impl Affected for MonsterCard {
    fn active_effects(&self) -> &[ModifierEffect] {
        &self.active_effects
    }

    fn add_active_effect(&mut self, effect: ModifierEffect, source: &str) {
        stack_into(&mut self.active_effects, effect);
        self.refresh_life(source);
    }

    fn remove_active_effect(&mut self, kind: ModifierKind, source: &str, amount: Option<u32>) {
        if remove_from(&mut self.active_effects, kind, amount) {
            self.refresh_life(source);
        }
    }
}
