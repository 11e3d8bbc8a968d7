//! Game configuration.
//!
//! Hosts configure a game at startup with a `GameConfig`: the shuffle seed
//! and the player's starting card. Grid dimensions are fixed constants.

use serde::{Deserialize, Serialize};

use crate::board::Position;

/// Number of columns on the board.
pub const BOARD_COLUMNS: u8 = 3;

/// Number of rows on the board.
pub const BOARD_ROWS: u8 = 3;

/// Total number of board positions.
pub const BOARD_SIZE: usize = (BOARD_COLUMNS as usize) * (BOARD_ROWS as usize);

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use dungeon_deck::board::Position;
/// use dungeon_deck::core::GameConfig;
///
/// let config = GameConfig::new(42)
///     .with_player_name("Hero")
///     .with_player_strength(5)
///     .with_player_combat(2);
///
/// assert_eq!(config.seed, 42);
/// assert_eq!(config.player_start, Position::CENTER);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for the dungeon shuffle.
    pub seed: u64,

    /// Display name of the player's card.
    pub player_name: String,

    /// Intrinsic strength of the player's card.
    pub player_strength: i32,

    /// Intrinsic combat rating of the player's card.
    pub player_combat: i32,

    /// Where the player's card starts.
    pub player_start: Position,
}

impl GameConfig {
    /// Create a configuration with default player stats.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Set the player's display name.
    #[must_use]
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Set the player's intrinsic strength.
    #[must_use]
    pub fn with_player_strength(mut self, strength: i32) -> Self {
        self.player_strength = strength;
        self
    }

    /// Set the player's intrinsic combat rating.
    #[must_use]
    pub fn with_player_combat(mut self, combat: i32) -> Self {
        self.player_combat = combat;
        self
    }

    /// Set the player's starting position.
    #[must_use]
    pub fn with_player_start(mut self, position: Position) -> Self {
        self.player_start = position;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            player_name: "Player".to_string(),
            player_strength: 1,
            player_combat: 0,
            player_start: Position::CENTER,
        }
    }
}
