//! Effect definitions.
//!
//! Effects come in two kinds:
//!
//! - [`ModifierEffect`]: persists on its holder and shifts derived strength
//!   and/or combat while active. Effects with the same id stack by summing
//!   their amounts.
//! - [`OneTimeEffect`]: applied once and discarded (e.g. food healing
//!   fatigue).
//!
//! Effects are created from string ids with [`create_effect`]; an unknown id
//! is a configuration error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Id of the fatigue modifier.
pub const FATIGUE: &str = "fatigue";

/// Id of the food one-time effect.
pub const FOOD: &str = "food";

/// Largest amount an effect may carry, so deltas always fit in an `i32`.
pub const MAX_AMOUNT: u32 = i32::MAX as u32;

/// Errors from creating effects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("unknown effect id {0}")]
    UnknownEffect(String),
    #[error("effect {effect} created with non-positive amount {amount}")]
    NonPositiveAmount { effect: String, amount: u32 },
    #[error("effect {0} needs an amount")]
    MissingAmount(String),
    #[error("effect {effect} amount {amount} exceeds {max}", max = MAX_AMOUNT)]
    AmountTooLarge { effect: String, amount: u32 },
}

fn check_amount(id: &str, amount: u32) -> Result<(), EffectError> {
    if amount == 0 {
        return Err(EffectError::NonPositiveAmount {
            effect: id.to_string(),
            amount,
        });
    }
    if amount > MAX_AMOUNT {
        return Err(EffectError::AmountTooLarge {
            effect: id.to_string(),
            amount,
        });
    }
    Ok(())
}

/// Kinds of persistent modifier effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    /// Strength penalty gained from inconclusive fights.
    Fatigue,
}

impl ModifierKind {
    /// Stable string id.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            ModifierKind::Fatigue => FATIGUE,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ModifierKind::Fatigue => "Fatigue",
        }
    }

    const fn strength_per_amount(self) -> i32 {
        match self {
            ModifierKind::Fatigue => -1,
        }
    }

    const fn combat_per_amount(self) -> i32 {
        match self {
            ModifierKind::Fatigue => 0,
        }
    }
}

/// Kinds of one-time effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OneTimeKind {
    /// Removes fatigue.
    Food,
}

impl OneTimeKind {
    /// Stable string id.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            OneTimeKind::Food => FOOD,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            OneTimeKind::Food => "Food",
        }
    }
}

/// A persistent, stacking effect on a monster.
///
/// The amount is always at least 1; an entry whose amount would reach zero
/// is removed from its holder instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierEffect {
    kind: ModifierKind,
    amount: u32,
}

impl ModifierEffect {
    /// Create a modifier. Fails on a zero amount or one above [`MAX_AMOUNT`].
    pub fn new(kind: ModifierKind, amount: u32) -> Result<Self, EffectError> {
        check_amount(kind.id(), amount)?;
        Ok(Self { kind, amount })
    }

    /// Create a fatigue modifier.
    pub fn fatigue(amount: u32) -> Result<Self, EffectError> {
        Self::new(ModifierKind::Fatigue, amount)
    }

    #[must_use]
    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[must_use]
    pub fn description(&self) -> String {
        match self.kind {
            ModifierKind::Fatigue => format!("Reduces strength by {}", self.amount),
        }
    }

    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    fn signed_amount(&self) -> i32 {
        i32::try_from(self.amount).unwrap_or(i32::MAX)
    }

    /// Contribution to the holder's derived strength.
    #[must_use]
    pub fn strength_delta(&self) -> i32 {
        self.kind.strength_per_amount().saturating_mul(self.signed_amount())
    }

    /// Contribution to the holder's derived combat.
    #[must_use]
    pub fn combat_delta(&self) -> i32 {
        self.kind.combat_per_amount().saturating_mul(self.signed_amount())
    }

    /// Stack another instance onto this one, capped at [`MAX_AMOUNT`].
    pub(crate) fn stack(&mut self, amount: u32) {
        self.amount = self.amount.saturating_add(amount).min(MAX_AMOUNT);
    }

    /// Reduce the amount; `None` means the entry is used up.
    pub(crate) fn reduced_by(&self, amount: u32) -> Option<Self> {
        let remaining = self.amount.checked_sub(amount)?;
        (remaining > 0).then_some(Self {
            kind: self.kind,
            amount: remaining,
        })
    }
}

/// An effect consumed on application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeEffect {
    kind: OneTimeKind,
    amount: u32,
}

impl OneTimeEffect {
    /// Create a one-time effect. Fails on a zero amount or one above
    /// [`MAX_AMOUNT`].
    pub fn new(kind: OneTimeKind, amount: u32) -> Result<Self, EffectError> {
        check_amount(kind.id(), amount)?;
        Ok(Self { kind, amount })
    }

    /// Create a food effect.
    pub fn food(amount: u32) -> Result<Self, EffectError> {
        Self::new(OneTimeKind::Food, amount)
    }

    #[must_use]
    pub fn kind(&self) -> OneTimeKind {
        self.kind
    }

    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    #[must_use]
    pub fn description(&self) -> String {
        match self.kind {
            OneTimeKind::Food => format!("Heals fatigue by {}", self.amount),
        }
    }

    fn apply<A: Affected + ?Sized>(&self, target: &mut A, source: &str) {
        match self.kind {
            OneTimeKind::Food => {
                target.remove_active_effect(ModifierKind::Fatigue, source, Some(self.amount));
            }
        }
    }
}

/// Something that can hold modifier effects.
pub trait Affected {
    /// Currently active modifiers, one entry per kind.
    fn active_effects(&self) -> &[ModifierEffect];

    /// Add a modifier, summing into an existing entry of the same kind.
    fn add_active_effect(&mut self, effect: ModifierEffect, source: &str);

    /// Remove `amount` of a modifier, or all of it when `amount` is `None`
    /// or exceeds what is held.
    fn remove_active_effect(&mut self, kind: ModifierKind, source: &str, amount: Option<u32>);
}

/// Any effect an item can carry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    Modifier(ModifierEffect),
    OneTime(OneTimeEffect),
}

impl Effect {
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Effect::Modifier(m) => m.kind.id(),
            Effect::OneTime(o) => o.kind.id(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Modifier(m) => m.kind.name(),
            Effect::OneTime(o) => o.kind.name(),
        }
    }

    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Effect::Modifier(m) => m.description(),
            Effect::OneTime(o) => o.description(),
        }
    }

    #[must_use]
    pub fn amount(&self) -> u32 {
        match self {
            Effect::Modifier(m) => m.amount,
            Effect::OneTime(o) => o.amount,
        }
    }

    /// The modifier, if this effect persists on its target.
    #[must_use]
    pub fn as_modifier(&self) -> Option<&ModifierEffect> {
        match self {
            Effect::Modifier(m) => Some(m),
            Effect::OneTime(_) => None,
        }
    }

    /// Apply this effect to `target`. `source` names whoever caused it.
    pub fn apply<A: Affected + ?Sized>(&self, target: &mut A, source: &str) {
        match self {
            Effect::Modifier(m) => target.add_active_effect(m.clone(), source),
            Effect::OneTime(o) => o.apply(target, source),
        }
    }
}

/// Create an effect from its string id.
///
/// ```
/// use dungeon_deck::effects::{create_effect, EffectError};
///
/// let fatigue = create_effect("fatigue", &[3]).unwrap();
/// assert_eq!(fatigue.name(), "Fatigue");
/// assert_eq!(fatigue.description(), "Reduces strength by 3");
///
/// assert!(matches!(
///     create_effect("poison", &[1]),
///     Err(EffectError::UnknownEffect(_))
/// ));
/// ```
pub fn create_effect(id: &str, amounts: &[u32]) -> Result<Effect, EffectError> {
    let amount = || {
        amounts
            .first()
            .copied()
            .ok_or_else(|| EffectError::MissingAmount(id.to_string()))
    };

    match id {
        FATIGUE => Ok(Effect::Modifier(ModifierEffect::fatigue(amount()?)?)),
        FOOD => Ok(Effect::OneTime(OneTimeEffect::food(amount()?)?)),
        _ => Err(EffectError::UnknownEffect(id.to_string())),
    }
}

/// Stack `effect` into `effects`: sum with a matching entry or append.
pub(crate) fn stack_into(effects: &mut Vec<ModifierEffect>, effect: ModifierEffect) {
    match effects.iter_mut().find(|e| e.kind == effect.kind) {
        Some(existing) => existing.stack(effect.amount),
        None => effects.push(effect),
    }
}

/// Remove `amount` of `kind` from `effects`. Returns whether anything changed.
pub(crate) fn remove_from(
    effects: &mut Vec<ModifierEffect>,
    kind: ModifierKind,
    amount: Option<u32>,
) -> bool {
    let Some(index) = effects.iter().position(|e| e.kind == kind) else {
        return false;
    };

    match amount.and_then(|n| effects[index].reduced_by(n)) {
        Some(reduced) => effects[index] = reduced,
        None => {
            effects.remove(index);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Holder {
        effects: Vec<ModifierEffect>,
        sources: Vec<String>,
    }

    impl Affected for Holder {
        fn active_effects(&self) -> &[ModifierEffect] {
            &self.effects
        }

        fn add_active_effect(&mut self, effect: ModifierEffect, source: &str) {
            self.sources.push(source.to_string());
            stack_into(&mut self.effects, effect);
        }

        fn remove_active_effect(&mut self, kind: ModifierKind, source: &str, amount: Option<u32>) {
            self.sources.push(source.to_string());
            remove_from(&mut self.effects, kind, amount);
        }
    }

    #[test]
    fn test_create_known_effects() {
        let fatigue = create_effect(FATIGUE, &[2]).unwrap();
        assert_eq!(fatigue.id(), "fatigue");
        assert_eq!(fatigue.amount(), 2);
        assert!(fatigue.as_modifier().is_some());

        let food = create_effect(FOOD, &[5]).unwrap();
        assert_eq!(food.id(), "food");
        assert_eq!(food.description(), "Heals fatigue by 5");
        assert!(food.as_modifier().is_none());
    }

    #[test]
    fn test_create_rejects_bad_input() {
        assert_eq!(
            create_effect("curse", &[1]),
            Err(EffectError::UnknownEffect("curse".to_string()))
        );
        assert_eq!(
            create_effect(FATIGUE, &[]),
            Err(EffectError::MissingAmount("fatigue".to_string()))
        );
        assert!(matches!(
            create_effect(FOOD, &[0]),
            Err(EffectError::NonPositiveAmount { .. })
        ));
    }

    #[test]
    fn test_modifier_deltas() {
        let fatigue = ModifierEffect::fatigue(4).unwrap();
        assert_eq!(fatigue.strength_delta(), -4);
        assert_eq!(fatigue.combat_delta(), 0);
    }

    #[test]
    fn test_amount_bounds() {
        assert!(ModifierEffect::fatigue(MAX_AMOUNT).is_ok());
        assert_eq!(
            create_effect(FATIGUE, &[3_000_000_000]),
            Err(EffectError::AmountTooLarge {
                effect: "fatigue".to_string(),
                amount: 3_000_000_000,
            })
        );
        assert!(matches!(
            OneTimeEffect::food(MAX_AMOUNT + 1),
            Err(EffectError::AmountTooLarge { .. })
        ));
    }

    #[test]
    fn test_stacking_caps_at_max_amount() {
        let mut effects = vec![ModifierEffect::fatigue(MAX_AMOUNT).unwrap()];
        stack_into(&mut effects, ModifierEffect::fatigue(MAX_AMOUNT).unwrap());

        assert_eq!(effects[0].amount(), MAX_AMOUNT);
        assert_eq!(effects[0].strength_delta(), -i32::MAX);
    }

    #[test]
    fn test_modifiers_stack() {
        let mut holder = Holder::default();

        Effect::Modifier(ModifierEffect::fatigue(2).unwrap()).apply(&mut holder, "Goblin");
        Effect::Modifier(ModifierEffect::fatigue(3).unwrap()).apply(&mut holder, "Orc");

        assert_eq!(holder.active_effects().len(), 1);
        assert_eq!(holder.active_effects()[0].amount(), 5);
        assert_eq!(holder.sources, vec!["Goblin", "Orc"]);
    }

    #[test]
    fn test_food_decrements_fatigue() {
        let mut holder = Holder::default();
        holder.add_active_effect(ModifierEffect::fatigue(5).unwrap(), "Troll");

        create_effect(FOOD, &[3]).unwrap().apply(&mut holder, "Bread");

        assert_eq!(holder.active_effects()[0].amount(), 2);
    }

    #[test]
    fn test_food_exceeding_fatigue_removes_it() {
        let mut holder = Holder::default();
        holder.add_active_effect(ModifierEffect::fatigue(2).unwrap(), "Troll");

        create_effect(FOOD, &[3]).unwrap().apply(&mut holder, "Bread");

        assert!(holder.active_effects().is_empty());
    }

    #[test]
    fn test_remove_without_amount() {
        let mut effects = vec![ModifierEffect::fatigue(9).unwrap()];
        assert!(remove_from(&mut effects, ModifierKind::Fatigue, None));
        assert!(effects.is_empty());
        assert!(!remove_from(&mut effects, ModifierKind::Fatigue, None));
    }

    #[test]
    fn test_remove_exact_amount_clears_entry() {
        let mut effects = vec![ModifierEffect::fatigue(3).unwrap()];
        remove_from(&mut effects, ModifierKind::Fatigue, Some(3));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_effect_serialization() {
        let effect = create_effect(FATIGUE, &[2]).unwrap();
        let json = serde_json::to_string(&effect).unwrap();
        let back: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);
    }
}
