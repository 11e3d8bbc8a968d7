//! Status effects.
//!
//! - `Effect`: sum type over one-time and modifier effects
//! - `ModifierEffect`: persistent, stacking strength/combat modifiers
//! - `OneTimeEffect`: consumed on application
//! - `Affected`: anything that can hold modifiers (monster cards)
//! - `create_effect`: factory from string ids used in deck definitions

mod effect;

pub use effect::{
    create_effect, Affected, Effect, EffectError, ModifierEffect, ModifierKind, OneTimeEffect,
    OneTimeKind, FATIGUE, FOOD, MAX_AMOUNT,
};
pub(crate) use effect::{remove_from, stack_into};
