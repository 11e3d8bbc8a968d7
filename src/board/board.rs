//! The 3x3 board: dealing, movement, combat, cascade.
//!
//! The board owns every card in play. Cards are plain data; the board
//! mutates them and raises the matching notifications on [`BoardEvents`].
//!
//! ## Move pipeline
//!
//! A call to [`Board::move_card`] runs to completion in this order:
//!
//! 1. the turn counter goes up by one
//! 2. the occupant of the destination is collected (item) or attacked
//!    (monster); a defeated monster goes to the discard pile
//! 3. the mover is relocated
//! 4. the card behind the vacated cell slides into it, and so on down the
//!    line until the edge of the board or an empty cell
//! 5. neighbours of every destination are turned face up, innermost slide
//!    first
//! 6. one deal pass refills empty cells
//!
//! If the player dies in step 2 the move stops there.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, instrument};

use super::position::Position;
use crate::cards::{Card, EquipmentType, ItemCard, MonsterCard, Side};
use crate::core::config::BOARD_SIZE;
use crate::core::entity::EntityId;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;
use crate::effects::Effect;
use crate::events::{
    BoardEvent, BoardEvents, CardDealt, CardDiscarded, CardFlipped, CardMoved, EffectsChanged,
    EquipmentChanged, ItemCollected, MonsterDied, PlayerDied, SpaceLeftEmpty,
};

/// Summary of one completed move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Turn number after the move.
    pub turn: u32,

    /// Item picked up from the destination.
    pub collected: Option<EntityId>,

    /// Monster killed at the destination.
    pub defeated: Option<EntityId>,

    /// Fatigue the player took from the fight.
    pub fatigue: Option<u32>,

    /// Cards that slid in behind the player, nearest first.
    pub cascaded: SmallVec<[EntityId; 2]>,

    /// The player died; nothing was relocated.
    pub player_died: bool,
}

/// Point-in-time copy of the board for hosts and tests.
///
/// Cells and the discard pile share structure with the live board, so
/// taking a snapshot does not copy any card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Row-major cells.
    pub cells: Vector<Option<Card>>,
    pub dungeon_len: usize,
    pub discarded: Vector<Card>,
    pub turn: u32,
    pub game_over: Option<PlayerDied>,
}

impl BoardSnapshot {
    #[must_use]
    pub fn card_at(&self, position: Position) -> Option<&Card> {
        if !position.is_on_board() {
            return None;
        }
        self.cells.get(position.index())?.as_ref()
    }
}

/// The board.
#[derive(Debug)]
pub struct Board {
    cells: Vector<Option<Card>>,
    dungeon: Vector<Card>,
    discarded: Vector<Card>,
    player_id: EntityId,
    turn: u32,
    game_over: Option<PlayerDied>,
    events: BoardEvents,
}

impl Board {
    /// Create a board, shuffling `dungeon` once.
    ///
    /// The player's card is placed face up at `start`. No cards are dealt
    /// until [`Board::deal_cards`] is called.
    pub fn new(
        dungeon: Vec<Card>,
        player: MonsterCard,
        start: Position,
        rng: &GameRng,
    ) -> Result<Self, EngineError> {
        let mut pile = dungeon;
        rng.for_context("dungeon").shuffle(&mut pile);
        Self::from_ordered_pile(pile, player, start)
    }

    /// Create a board that deals `pile` front to back, without shuffling.
    ///
    /// The player must start alive: a derived strength of zero or below is
    /// rejected.
    pub fn from_ordered_pile(
        pile: Vec<Card>,
        mut player: MonsterCard,
        start: Position,
    ) -> Result<Self, EngineError> {
        if !start.is_on_board() {
            return Err(EngineError::PositionOutOfBounds(start));
        }
        let strength = player.strength();
        if strength <= 0 {
            return Err(EngineError::NonPositivePlayerStrength(strength));
        }
        player.base_mut().set_side(Side::Front);

        let mut cells: Vector<Option<Card>> = Vector::from(vec![None; BOARD_SIZE]);
        let player_id = player.id();
        cells[start.index()] = Some(Card::Monster(player));

        Ok(Self {
            cells,
            dungeon: Vector::from(pile),
            discarded: Vector::new(),
            player_id,
            turn: 0,
            game_over: None,
            events: BoardEvents::new(),
        })
    }

    /// Notification channels.
    #[must_use]
    pub fn events(&self) -> &BoardEvents {
        &self.events
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// A card on the board by id.
    #[must_use]
    pub fn get_card(&self, id: EntityId) -> Option<&Card> {
        self.cells.iter().flatten().find(|card| card.id() == id)
    }

    /// A card on the board by id, failing if it is not in play.
    pub fn card(&self, id: EntityId) -> Result<&Card, EngineError> {
        self.get_card(id).ok_or(EngineError::CardNotFound(id))
    }

    /// The card at `position`, if any. Off-board positions hold nothing.
    #[must_use]
    pub fn card_at(&self, position: Position) -> Option<&Card> {
        if !position.is_on_board() {
            return None;
        }
        self.cells[position.index()].as_ref()
    }

    /// Where card `id` sits, if it is on the board.
    #[must_use]
    pub fn get_position(&self, id: EntityId) -> Option<Position> {
        self.cells
            .iter()
            .position(|cell| cell.as_ref().is_some_and(|card| card.id() == id))
            .map(Position::from_index)
    }

    /// Where card `id` sits, failing if it is not on the board.
    pub fn position_of(&self, id: EntityId) -> Result<Position, EngineError> {
        self.get_position(id).ok_or(EngineError::CardNotFound(id))
    }

    /// Occupied cells, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, &Card)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.as_ref().map(|card| (Position::from_index(i), card)))
    }

    #[must_use]
    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    /// The player's card, `None` once it has died.
    #[must_use]
    pub fn player(&self) -> Option<&MonsterCard> {
        self.get_card(self.player_id).and_then(Card::as_monster)
    }

    #[must_use]
    pub fn player_position(&self) -> Option<Position> {
        self.get_position(self.player_id)
    }

    /// Only the living player's card moves.
    #[must_use]
    pub fn can_move_card(&self, id: EntityId) -> bool {
        id == self.player_id && self.game_over.is_none() && self.get_card(id).is_some()
    }

    /// Whether `to` is an orthogonal neighbour of card `id`'s cell.
    #[must_use]
    pub fn can_move_card_to(&self, id: EntityId, to: Position) -> bool {
        to.is_on_board()
            && self
                .get_position(id)
                .is_some_and(|from| from.is_adjacent(to))
    }

    /// Every legal destination for card `id`, row-major.
    #[must_use]
    pub fn movable_to_positions(&self, id: EntityId) -> Vec<Position> {
        self.get_position(id)
            .map(|from| from.neighbors().collect())
            .unwrap_or_default()
    }

    /// Cards left in the dungeon pile.
    #[must_use]
    pub fn dungeon_len(&self) -> usize {
        self.dungeon.len()
    }

    /// Cards removed from play, oldest first.
    #[must_use]
    pub fn discarded(&self) -> &Vector<Card> {
        &self.discarded
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// How the game ended, if it has.
    #[must_use]
    pub fn game_over(&self) -> Option<&PlayerDied> {
        self.game_over.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            cells: self.cells.clone(),
            dungeon_len: self.dungeon.len(),
            discarded: self.discarded.clone(),
            turn: self.turn,
            game_over: self.game_over.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Fill every empty cell from the dungeon pile, row-major.
    ///
    /// A card landing next to the player is dealt face up. Once the pile is
    /// empty, each remaining empty cell raises `space_left_empty`; repeated
    /// passes raise it again.
    #[instrument(skip(self))]
    pub fn deal_cards(&mut self) {
        let player_at = self.player_position();

        for position in Position::all() {
            if self.cells[position.index()].is_some() {
                continue;
            }

            match self.dungeon.pop_front() {
                Some(mut card) => {
                    if player_at.is_some_and(|p| p.is_adjacent(position)) {
                        card.set_side(Side::Front);
                    }
                    debug!(card = %card.id(), %position, side = ?card.side(), "dealt");
                    self.cells[position.index()] = Some(card.clone());
                    self.events
                        .emit(BoardEvent::CardDealt(CardDealt { card, position }));
                }
                None => {
                    debug!(%position, "space left empty");
                    self.events
                        .emit(BoardEvent::SpaceLeftEmpty(SpaceLeftEmpty { position }));
                }
            }
        }
    }

    /// Move the player's card one step.
    #[instrument(skip(self))]
    pub fn move_card(&mut self, id: EntityId, to: Position) -> Result<MoveOutcome, EngineError> {
        if self.game_over.is_some() {
            return Err(EngineError::GameOver);
        }
        if !to.is_on_board() {
            return Err(EngineError::PositionOutOfBounds(to));
        }
        let from = self.position_of(id)?;
        if id != self.player_id {
            return Err(EngineError::CardNotMovable(id));
        }
        if !from.is_adjacent(to) {
            return Err(EngineError::IllegalMove { from, to });
        }

        self.turn += 1;
        let mut outcome = MoveOutcome {
            turn: self.turn,
            ..MoveOutcome::default()
        };

        self.resolve_arrival(from, to, &mut outcome)?;
        if outcome.player_died {
            return Ok(outcome);
        }

        // Slide chain: each step fills the cell the previous mover left.
        let mut destinations: SmallVec<[Position; 3]> = SmallVec::new();
        let mut step = Some((from, to));
        while let Some((from, to)) = step.take() {
            let mover = self.relocate(from, to)?;
            if !destinations.is_empty() {
                outcome.cascaded.push(mover);
                debug!(card = %mover, %from, %to, "cascade");
            }
            destinations.push(to);

            step = from
                .behind(to)
                .filter(|behind| self.cells[behind.index()].is_some())
                .map(|behind| (behind, from));
        }

        for &destination in destinations.iter().rev() {
            self.flip_neighbors(destination);
        }

        self.deal_cards();
        Ok(outcome)
    }

    /// Collect or fight whatever occupies `to`.
    fn resolve_arrival(
        &mut self,
        from: Position,
        to: Position,
        outcome: &mut MoveOutcome,
    ) -> Result<(), EngineError> {
        let Some(occupant) = self.cells[to.index()].take() else {
            return Ok(());
        };

        match occupant {
            Card::Item(item) => {
                debug!(item = %item.id(), name = item.name(), "collected");
                outcome.collected = Some(item.id());
                self.events
                    .emit(BoardEvent::ItemCollected(ItemCollected { item }));
            }
            Card::Monster(mut defender) => {
                let attacker = self.cells[from.index()]
                    .as_mut()
                    .and_then(Card::as_monster_mut)
                    .ok_or(EngineError::CardNotFound(self.player_id))?;
                let attack = attacker.attack(&mut defender)?;
                let attacker_id = attacker.id();

                debug!(
                    defender = %defender.id(),
                    name = defender.name(),
                    fatigue = ?attack.fatigue,
                    "attacked"
                );
                outcome.defeated = Some(defender.id());
                outcome.fatigue = attack.fatigue;

                self.discard_dead(defender);
                if attack.fatigue.is_some() {
                    self.events.emit(BoardEvent::EffectsChanged(EffectsChanged {
                        monster: attacker_id,
                    }));
                }
                if attack.attacker_died {
                    self.check_player_death();
                    outcome.player_died = true;
                }
            }
        }
        Ok(())
    }

    /// Move the card at `from` into the (empty) cell `to`.
    fn relocate(&mut self, from: Position, to: Position) -> Result<EntityId, EngineError> {
        let card = self.cells[from.index()]
            .take()
            .ok_or(EngineError::NoCardAtPosition(from))?;
        let id = card.id();
        self.cells[to.index()] = Some(card);

        debug!(card = %id, %from, %to, "moved");
        self.events
            .emit(BoardEvent::CardMoved(CardMoved { card: id, from, to }));
        Ok(id)
    }

    fn flip_neighbors(&mut self, center: Position) {
        for position in center.neighbors() {
            if let Some(card) = self.cells[position.index()].as_mut() {
                if card.set_side(Side::Front) {
                    let flipped = CardFlipped {
                        card: card.id(),
                        side: Side::Front,
                    };
                    self.events.emit(BoardEvent::CardFlipped(flipped));
                }
            }
        }
    }

    /// Send a dead monster to the discard pile.
    fn discard_dead(&mut self, monster: MonsterCard) {
        let killed_by = monster.killed_by().unwrap_or_default().to_string();
        self.events.emit(BoardEvent::MonsterDied(MonsterDied {
            monster: monster.id(),
            killed_by,
        }));

        let card = Card::Monster(monster);
        self.discarded.push_back(card.clone());
        self.events
            .emit(BoardEvent::CardDiscarded(CardDiscarded { card }));
    }

    /// Put a used-up item on the discard pile.
    pub(crate) fn discard_item(&mut self, item: ItemCard) {
        debug!(item = %item.id(), name = item.name(), "discarded");
        let card = Card::Item(item);
        self.discarded.push_back(card.clone());
        self.events
            .emit(BoardEvent::CardDiscarded(CardDiscarded { card }));
    }

    /// End the game if the player's card has died.
    fn check_player_death(&mut self) {
        let Some(position) = self.player_position() else {
            return;
        };
        let dead = self.cells[position.index()]
            .as_ref()
            .and_then(Card::as_monster)
            .is_some_and(MonsterCard::is_dead);
        if !dead {
            return;
        }

        let Some(Card::Monster(player)) = self.cells[position.index()].take() else {
            return;
        };
        let killed_by = player.killed_by().unwrap_or_default().to_string();
        self.discard_dead(player);

        let died = PlayerDied {
            killed_by,
            turn: self.turn,
        };
        info!(killed_by = %died.killed_by, turn = died.turn, "player died");
        self.game_over = Some(died.clone());
        self.events.emit(BoardEvent::PlayerDied(died));
    }

    // ------------------------------------------------------------------
    // Player actions
    // ------------------------------------------------------------------

    fn player_mut(&mut self) -> Result<&mut MonsterCard, EngineError> {
        if self.game_over.is_some() {
            return Err(EngineError::GameOver);
        }
        let id = self.player_id;
        self.cells
            .iter_mut()
            .flatten()
            .find(|card| card.id() == id)
            .and_then(Card::as_monster_mut)
            .ok_or(EngineError::CardNotFound(id))
    }

    /// Equip `item` on the player, returning whatever it displaced.
    pub fn equip_player(&mut self, item: ItemCard) -> Result<Vec<ItemCard>, EngineError> {
        let player = self.player_mut()?;
        let result = player.set_equipment(item)?;
        let occupants: SmallVec<[(EquipmentType, Option<EntityId>); 4]> = result
            .changed
            .iter()
            .map(|&slot| (slot, player.equipment(slot).map(ItemCard::id)))
            .collect();
        let monster = player.id();

        for (slot, item) in occupants {
            debug!(%slot, item = ?item, "equipment changed");
            self.events
                .emit(BoardEvent::EquipmentChanged(EquipmentChanged { monster, slot, item }));
        }
        self.check_player_death();
        Ok(result.displaced)
    }

    /// Take the item in `slot` off the player.
    pub fn unequip_player(&mut self, slot: EquipmentType) -> Result<Option<ItemCard>, EngineError> {
        let player = self.player_mut()?;
        let monster = player.id();
        let Some(removed) = player.remove_equipment(slot) else {
            return Ok(None);
        };

        for &slot in removed.equipment_types() {
            debug!(%slot, item = %removed.id(), "equipment removed");
            self.events.emit(BoardEvent::EquipmentChanged(EquipmentChanged {
                monster,
                slot,
                item: None,
            }));
        }
        self.check_player_death();
        Ok(Some(removed))
    }

    /// Apply `effect` to the player. `source` names its cause.
    pub fn apply_effect_to_player(&mut self, effect: &Effect, source: &str) -> Result<(), EngineError> {
        let player = self.player_mut()?;
        let monster = player.id();
        effect.apply(player, source);

        debug!(effect = effect.id(), amount = effect.amount(), source, "effect applied");
        self.events
            .emit(BoardEvent::EffectsChanged(EffectsChanged { monster }));
        self.check_player_death();
        Ok(())
    }
}
