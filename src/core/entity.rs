//! Entity identification system.
//!
//! Every card instance in a game (the player's card included) has a unique
//! `EntityId`. Ids come from an explicit [`IdAllocator`] owned by the game,
//! so two games never share hidden counter state and tests are deterministic.
//!
//! ## Usage
//!
//! ```
//! use dungeon_deck::core::{EntityId, IdAllocator};
//!
//! let mut ids = IdAllocator::new();
//!
//! let player = ids.alloc();
//! let goblin = ids.alloc();
//!
//! assert_eq!(player, EntityId(1));
//! assert_eq!(goblin, EntityId(2));
//! assert_eq!(ids.allocated(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
///
/// Distinct from [`CardId`](crate::cards::CardId), which names the card
/// *definition* several instances may share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Hands out fresh entity ids.
///
/// Ids start at 1 and only increase. Zero is never allocated, so it stays
/// free as a sentinel in external data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator whose first id is `EntityId(1)`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub const fn allocated(&self) -> u32 {
        self.next - 1
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
