//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Raw card data from a deck definition
//! - `Card`: Runtime card, either an `ItemCard` or a `MonsterCard`
//! - `CardRegistry`: Validated definition lookup and instantiation

pub mod definition;
pub mod instance;
pub mod monster;
pub mod registry;

pub use definition::{
    CardDefinition, CardId, EffectSpec, EquipmentType, ItemProperties, MonsterProperties,
    UnknownEquipmentType,
};
pub use instance::{Card, CardBase, ItemCard, Side};
pub use monster::{AttackOutcome, EquipOutcome, LifeState, MonsterCard};
pub use registry::{CardRegistry, CardTemplate, TemplateKind};
