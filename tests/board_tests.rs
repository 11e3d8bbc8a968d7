//! Board integration tests.
//!
//! These tests drive the board through its public commands and observe it
//! through its notification channels, the way a renderer would.

use std::cell::RefCell;
use std::rc::Rc;

use dungeon_deck::board::{Board, Position};
use dungeon_deck::cards::{
    Card, CardBase, CardDefinition, CardId, CardRegistry, EquipmentType, ItemProperties,
    MonsterCard, Side,
};
use dungeon_deck::core::{EntityId, IdAllocator};
use dungeon_deck::events::BoardEvent;

const TORCH: CardId = CardId::new(1);
const GOBLIN: CardId = CardId::new(2);

fn registry() -> CardRegistry {
    CardRegistry::from_definitions(&[
        CardDefinition::item(
            TORCH,
            "Torch",
            ItemProperties::new()
                .with_equipment_type(EquipmentType::Held)
                .with_combat(1),
        ),
        CardDefinition::monster(GOBLIN, "Goblin", 5, 4),
    ])
    .unwrap()
}

/// Build a board whose pile deals `kinds` in order, player at the centre.
fn board_with(kinds: &[CardId], strength: i32, combat: i32) -> Board {
    let registry = registry();
    let mut ids = IdAllocator::new();
    let player = MonsterCard::new(
        CardBase::new(ids.alloc(), CardId::default(), "Player", Side::Front),
        strength,
        combat,
    );
    let pile: Vec<Card> = kinds
        .iter()
        .map(|&kind| registry.instantiate(kind, ids.alloc(), Side::Back).unwrap())
        .collect();
    Board::from_ordered_pile(pile, player, Position::CENTER).unwrap()
}

fn record(board: &Board) -> Rc<RefCell<Vec<BoardEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    board
        .events()
        .all
        .subscribe(move |e: &BoardEvent| sink.borrow_mut().push(e.clone()));
    log
}

/// Dealing into every empty cell: the player's cell is never dealt to.
#[test]
fn test_full_pile_fills_board() {
    let mut board = board_with(&[TORCH; 9], 1, 0);
    let log = record(&board);

    board.deal_cards();

    let log = log.borrow();
    let dealt = log.iter().filter(|e| matches!(e, BoardEvent::CardDealt(_))).count();
    let empty = log
        .iter()
        .filter(|e| matches!(e, BoardEvent::SpaceLeftEmpty(_)))
        .count();
    assert_eq!(dealt, 8);
    assert_eq!(empty, 0);
    assert_eq!(board.occupied().count(), 9);
    assert_eq!(board.dungeon_len(), 1);
}

/// A second deal on a full board does nothing.
#[test]
fn test_deal_is_noop_on_full_board() {
    let mut board = board_with(&[TORCH; 12], 1, 0);
    board.deal_cards();
    let log = record(&board);

    board.deal_cards();

    assert!(log.borrow().is_empty());
    assert_eq!(board.dungeon_len(), 4);
}

/// Stepping onto an item collects it and moves the player.
#[test]
fn test_move_onto_item() {
    let mut board = board_with(&[TORCH; 8], 1, 3);
    board.deal_cards();
    let torch = board.card_at(Position::new(1, 0)).unwrap().id();
    let player = board.player_id();

    let collected = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&collected);
    board
        .events()
        .item_collected
        .subscribe(move |e| sink.borrow_mut().push(e.item.id()));
    let moved = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&moved);
    board
        .events()
        .card_moved
        .subscribe(move |e| sink.borrow_mut().push(*e));

    board.move_card(player, Position::new(1, 0)).unwrap();

    assert_eq!(*collected.borrow(), vec![torch]);
    assert_eq!(board.player_position(), Some(Position::new(1, 0)));
    let first = moved.borrow()[0];
    assert_eq!(first.card, player);
    assert_eq!(first.from, Position::new(1, 1));
    assert_eq!(first.to, Position::new(1, 0));
}

/// Notifications of one move follow the pipeline order.
#[test]
fn test_move_notification_order() {
    let mut board = board_with(&[TORCH; 9], 1, 0);
    board.deal_cards();
    let log = record(&board);

    board.move_card(board.player_id(), Position::new(1, 0)).unwrap();

    let names: Vec<_> = log.borrow().iter().map(BoardEvent::name).collect();
    assert_eq!(
        names,
        vec![
            "item_collected",
            "card_moved",
            "card_moved",
            "card_flipped",
            "card_flipped",
            "card_dealt",
        ]
    );
}

/// Moving sideways along the bottom row pulls the far card across.
#[test]
fn test_horizontal_cascade() {
    let mut board = board_with(&[TORCH; 8], 1, 0);
    board.deal_cards();
    let player = board.player_id();
    board.move_card(player, Position::new(1, 2)).unwrap();
    let left = board.card_at(Position::new(0, 2)).unwrap().id();

    let outcome = board.move_card(player, Position::new(2, 2)).unwrap();

    assert_eq!(outcome.cascaded.as_slice(), &[left]);
    assert_eq!(board.card_at(Position::new(1, 2)).unwrap().id(), left);
    assert!(board.card_at(Position::new(0, 2)).is_none());
}

/// Fighting a monster the player outclasses costs nothing.
#[test]
fn test_clean_win() {
    let mut kinds = [TORCH; 8];
    kinds[1] = GOBLIN;
    let mut board = board_with(&kinds, 10, 6);
    board.deal_cards();

    let outcome = board.move_card(board.player_id(), Position::new(1, 0)).unwrap();

    assert!(outcome.defeated.is_some());
    assert_eq!(outcome.fatigue, None);
    assert_eq!(board.player().unwrap().strength(), 10);
    assert!(board.discarded()[0].as_monster().unwrap().is_dead());
}

/// Legal destinations are exactly the orthogonal neighbours.
#[test]
fn test_movable_positions() {
    let board = board_with(&[], 1, 0);
    let player = board.player_id();

    assert_eq!(
        board.movable_to_positions(player),
        vec![
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(2, 1),
            Position::new(1, 2),
        ]
    );
    assert!(board.can_move_card(player));
    assert!(!board.can_move_card(EntityId(99)));
    assert!(board.can_move_card_to(player, Position::new(2, 1)));
    assert!(!board.can_move_card_to(player, Position::new(2, 2)));
    assert!(board.movable_to_positions(EntityId(99)).is_empty());
}

/// Lookups distinguish expected absence from caller mistakes.
#[test]
fn test_lookups() {
    let mut board = board_with(&[TORCH; 8], 1, 0);
    board.deal_cards();
    let id = board.card_at(Position::new(2, 2)).unwrap().id();

    assert_eq!(board.get_position(id), Some(Position::new(2, 2)));
    assert_eq!(board.position_of(id).unwrap(), Position::new(2, 2));
    assert_eq!(board.card(id).unwrap().name(), "Torch");
    assert!(board.get_card(EntityId(500)).is_none());
    assert!(board.card(EntityId(500)).is_err());
    assert!(board.card_at(Position::new(5, 5)).is_none());
}

/// Snapshots serialise for hosts.
#[test]
fn test_snapshot_json() {
    let mut board = board_with(&[TORCH; 8], 1, 0);
    board.deal_cards();

    let json = serde_json::to_value(board.snapshot()).unwrap();

    assert_eq!(json["turn"], 0);
    assert_eq!(json["dungeon_len"], 0);
    assert_eq!(json["cells"].as_array().unwrap().len(), 9);
}
