//! Notification plumbing.
//!
//! - `EventChannel`: the synchronous publish/subscribe primitive
//! - `BoardEvents`: the board's channels, one per notification kind
//! - `BoardEvent`: every notification as one sum type

mod channel;
mod event;

pub use channel::{EventChannel, Listener, SubscriptionId};
pub use event::{
    BoardEvent, BoardEvents, CardDealt, CardDiscarded, CardFlipped, CardMoved, EffectsChanged,
    EquipmentChanged, ItemCollected, MonsterDied, PlayerDied, SpaceLeftEmpty,
};
