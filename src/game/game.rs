//! Game composition root.
//!
//! `Game::new` turns a deck definition into cards, builds the board from
//! the dungeon pile, fills the hand and equips the starting gear. Items the
//! player steps on reach the hand through the board's `item_collected`
//! channel.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, instrument};

use super::hand::Hand;
use crate::board::{Board, MoveOutcome, Position};
use crate::cards::{CardBase, CardId, CardRegistry, EquipmentType, ItemCard, MonsterCard, Side};
use crate::core::config::GameConfig;
use crate::core::entity::{EntityId, IdAllocator};
use crate::core::error::EngineError;
use crate::core::rng::GameRng;
use crate::deck::{DeckDefinition, DeckError};
use crate::events::BoardEvents;

/// A running game: board, hand and the definitions they were built from.
///
/// ## Example
///
/// ```
/// use dungeon_deck::board::Position;
/// use dungeon_deck::cards::{CardDefinition, CardId};
/// use dungeon_deck::core::GameConfig;
/// use dungeon_deck::deck::DeckDefinition;
/// use dungeon_deck::game::Game;
///
/// let deck = DeckDefinition::new()
///     .with_card(CardDefinition::monster(CardId::new(1), "Rat", 1, 1))
///     .with_dungeon_cards(CardId::new(1), 12);
///
/// let mut game = Game::new(&deck, GameConfig::new(3)).unwrap();
/// game.deal();
///
/// assert_eq!(game.board().occupied().count(), 9);
/// assert_eq!(game.board().dungeon_len(), 4);
/// assert_eq!(game.board().player_position(), Some(Position::CENTER));
/// ```
#[derive(Debug)]
pub struct Game {
    board: Board,
    hand: Rc<RefCell<Hand>>,
    registry: CardRegistry,
    config: GameConfig,
}

impl Game {
    /// Validate `deck` and build a game from it.
    #[instrument(skip(deck))]
    pub fn new(deck: &DeckDefinition, config: GameConfig) -> Result<Self, EngineError> {
        let registry = deck.validate()?;
        let mut ids = IdAllocator::new();

        let player = MonsterCard::new(
            CardBase::new(ids.alloc(), CardId::default(), config.player_name.clone(), Side::Front),
            config.player_strength,
            config.player_combat,
        );

        let mut dungeon = Vec::new();
        for entry in &deck.dungeon_cards {
            for _ in 0..entry.quantity {
                dungeon.push(registry.instantiate(entry.id, ids.alloc(), Side::Back)?);
            }
        }

        let rng = GameRng::new(config.seed);
        let board = Board::new(dungeon, player, config.player_start, &rng)?;

        let hand = Rc::new(RefCell::new(Hand::new()));
        let collector = Rc::clone(&hand);
        board.events().item_collected.subscribe(move |e| {
            collector.borrow_mut().add_card(e.item.clone());
        });

        let mut game = Self {
            board,
            hand,
            registry,
            config,
        };

        for entry in &deck.hand_cards {
            for _ in 0..entry.quantity {
                let item = game.registry.instantiate_item(entry.id, ids.alloc(), Side::Front)?;
                game.hand.borrow_mut().add_card(item);
            }
        }

        for &id in &deck.equipped_card_ids {
            let item = game.registry.instantiate_item(id, ids.alloc(), Side::Front)?;
            let displaced = game.board.equip_player(item)?;
            if game.board.is_game_over() {
                return Err(DeckError::LethalStartingGear(id).into());
            }
            game.return_to_hand(displaced);
        }

        info!(
            dungeon = game.board.dungeon_len(),
            hand = game.hand.borrow().len(),
            cards = ids.allocated(),
            "game created"
        );
        Ok(game)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn events(&self) -> &BoardEvents {
        self.board.events()
    }

    /// A copy of the hand as it is now. Later pickups do not show up in it.
    #[must_use]
    pub fn hand(&self) -> Hand {
        self.hand.borrow().clone()
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_id(&self) -> EntityId {
        self.board.player_id()
    }

    #[must_use]
    pub fn player(&self) -> Option<&MonsterCard> {
        self.board.player()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// Refill empty cells from the dungeon pile.
    pub fn deal(&mut self) {
        self.board.deal_cards();
    }

    /// Move the player one step.
    pub fn move_player(&mut self, to: Position) -> Result<MoveOutcome, EngineError> {
        let player = self.board.player_id();
        self.board.move_card(player, to)
    }

    /// Move a card one step. Only the player's card is movable.
    pub fn move_card(&mut self, id: EntityId, to: Position) -> Result<MoveOutcome, EngineError> {
        self.board.move_card(id, to)
    }

    /// Equip an item from the hand. Displaced items go back to the hand.
    pub fn equip_from_hand(&mut self, id: EntityId) -> Result<(), EngineError> {
        if self.board.is_game_over() {
            return Err(EngineError::GameOver);
        }
        if !self.hand.borrow().card(id)?.is_equippable() {
            return Err(EngineError::NotEquippable(id));
        }

        let item = self
            .hand
            .borrow_mut()
            .remove_card(id)
            .ok_or(EngineError::CardNotFound(id))?;
        debug!(item = %id, name = item.name(), "equip from hand");
        let displaced = self.board.equip_player(item)?;
        self.return_to_hand(displaced);
        Ok(())
    }

    /// Take the item in `slot` off the player and put it in the hand.
    pub fn unequip_to_hand(&mut self, slot: EquipmentType) -> Result<Option<EntityId>, EngineError> {
        let removed = self.board.unequip_player(slot)?;
        Ok(removed.map(|item| {
            let id = item.id();
            self.hand.borrow_mut().add_card(item);
            id
        }))
    }

    /// Use up a non-equippable item from the hand, applying its effects to
    /// the player. The item goes to the discard pile.
    pub fn use_item(&mut self, id: EntityId) -> Result<(), EngineError> {
        if self.board.is_game_over() {
            return Err(EngineError::GameOver);
        }
        if self.hand.borrow().card(id)?.is_equippable() {
            return Err(EngineError::NotConsumable(id));
        }

        let item = self
            .hand
            .borrow_mut()
            .remove_card(id)
            .ok_or(EngineError::CardNotFound(id))?;
        debug!(item = %id, name = item.name(), "use item");

        for effect in item.effects() {
            if self.board.is_game_over() {
                break;
            }
            self.board.apply_effect_to_player(effect, item.name())?;
        }
        self.board.discard_item(item);
        Ok(())
    }

    fn return_to_hand(&mut self, items: Vec<ItemCard>) {
        let mut hand = self.hand.borrow_mut();
        for item in items {
            debug!(item = %item.id(), name = item.name(), "returned to hand");
            hand.add_card(item);
        }
    }
}
