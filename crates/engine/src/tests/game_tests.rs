use super::*;
use shared::domain::{Cell, Orientation};

fn seated(orientation: Orientation, size: usize) -> (GameState, ConnectionId, ConnectionId) {
    let mut game = GameState::new(BoardConfig::new(orientation, size).expect("config"));
    let alice = ConnectionId::new_v4();
    let bob = ConnectionId::new_v4();
    game.add_player(alice, "alice").expect("seat one");
    game.add_player(bob, "bob").expect("seat two");
    (game, alice, bob)
}

fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

#[test]
fn players_take_the_lowest_free_seat() {
    let mut game = GameState::new(BoardConfig::new(Orientation::Standard, 8).expect("config"));
    let first = ConnectionId::new_v4();
    let second = ConnectionId::new_v4();
    assert_eq!(game.add_player(first, "a").expect("seat").player_number, PlayerNumber::One);
    assert_eq!(game.add_player(second, "b").expect("seat").player_number, PlayerNumber::Two);
    assert_eq!(
        game.add_player(ConnectionId::new_v4(), "c"),
        Err(GameError::RoomFull)
    );

    game.remove_player(first);
    let third = game.add_player(ConnectionId::new_v4(), "c").expect("seat");
    assert_eq!(third.player_number, PlayerNumber::One);
    assert_eq!(game.players()[0].player_number, PlayerNumber::One);
    assert_eq!(game.players()[1].connection, second);
}

#[test]
fn player_names_are_trimmed_and_capped() {
    let mut game = GameState::new(BoardConfig::new(Orientation::Standard, 8).expect("config"));
    let long = format!("  {}  ", "é".repeat(40));
    let first = game.add_player(ConnectionId::new_v4(), &long).expect("seat");
    assert_eq!(first.name, "é".repeat(32));

    let second = game.add_player(ConnectionId::new_v4(), "   ").expect("seat");
    assert_eq!(second.name, "Player");
    assert_eq!(game.players()[0].name.chars().count(), 32);
}

#[test]
fn turn_alternates_regardless_of_capture_outcome() {
    let (mut game, _, _) = seated(Orientation::Checkerboard, 8);
    let moves = [
        (PlayerNumber::One, vec![c(0, 2)], c(0, 2)),
        (PlayerNumber::Two, vec![], c(5, 5)),
        (PlayerNumber::One, vec![c(0, 0)], c(0, 0)),
        (PlayerNumber::Two, vec![c(7, 0)], c(7, 0)),
    ];
    for (mover, selected, clicked) in moves {
        assert_eq!(game.current_player(), mover);
        game.apply_move(mover, &selected, clicked).expect("accepted");
        assert_eq!(game.current_player(), mover.opponent());
    }
}

#[test]
fn empty_selection_still_passes_the_turn_and_locks_the_click() {
    let (mut game, _, _) = seated(Orientation::Checkerboard, 8);
    let before = game.board().clone();

    let outcome = game
        .apply_move(PlayerNumber::One, &[c(0, 0)], c(0, 0))
        .expect("accepted");

    assert!(outcome.capture_groups.is_empty());
    assert_eq!(game.board(), &before);
    assert_eq!(game.current_player(), PlayerNumber::Two);
    assert_eq!(game.last_move(), Some(c(0, 0)));
}

#[test]
fn invalid_moves_are_rejected_without_side_effects() {
    let mut game = GameState::new(BoardConfig::new(Orientation::Standard, 8).expect("config"));
    game.add_player(ConnectionId::new_v4(), "solo").expect("seat");
    assert_eq!(
        game.apply_move(PlayerNumber::One, &[c(1, 1)], c(1, 1)),
        Err(GameError::WaitingForOpponent)
    );

    let (mut game, _, _) = seated(Orientation::Standard, 8);
    assert_eq!(
        game.apply_move(PlayerNumber::Two, &[c(1, 1)], c(1, 1)),
        Err(GameError::OutOfTurn)
    );
    assert_eq!(
        game.apply_move(PlayerNumber::One, &[c(8, 1)], c(8, 1)),
        Err(GameError::OutOfBounds { x: 8, y: 1 })
    );
    assert_eq!(game.board().count(Cell::Neutral), 64);

    game.apply_move(PlayerNumber::One, &[c(1, 1)], c(1, 1))
        .expect("accepted");
    assert_eq!(
        game.apply_move(PlayerNumber::Two, &[c(1, 1)], c(1, 1)),
        Err(GameError::LockedTile { x: 1, y: 1 })
    );
    assert_eq!(game.current_player(), PlayerNumber::Two);
}

#[test]
fn scores_are_recomputed_and_never_exceed_one_hundred() {
    let (mut game, _, _) = seated(Orientation::TopBottomSplit, 8);
    let moves = [
        (PlayerNumber::One, c(0, 3)),
        (PlayerNumber::Two, c(3, 3)),
        (PlayerNumber::One, c(4, 4)),
        (PlayerNumber::Two, c(2, 2)),
    ];
    for (mover, clicked) in moves {
        game.apply_move(mover, &[clicked, clicked.offset(0, 1)], clicked)
            .expect("accepted");
        let expected = scoring::calculate(game.board());
        let one = game.player(PlayerNumber::One).expect("one").score;
        let two = game.player(PlayerNumber::Two).expect("two").score;
        assert_eq!((one, two), (expected.player_one, expected.player_two));
        assert!(one + two <= 100);
    }
}

#[test]
fn reaching_the_threshold_ends_the_game() {
    let (mut game, alice, _) = seated(Orientation::Standard, 4);
    let selected: Vec<Coord> = (0..3).flat_map(|x| (0..4).map(move |y| c(x, y))).collect();

    let outcome = game
        .apply_move(PlayerNumber::One, &selected, c(0, 0))
        .expect("accepted");

    let winner = outcome.winner.expect("winner");
    assert_eq!(winner.connection, alice);
    assert_eq!(winner.score, 75);
    assert_eq!(game.winner(), Some(PlayerNumber::One));
    assert_eq!(
        game.apply_move(PlayerNumber::Two, &[c(3, 3)], c(3, 3)),
        Err(GameError::GameOver)
    );
}

#[test]
fn losing_a_player_resets_the_game() {
    let (mut game, _, bob) = seated(Orientation::Checkerboard, 8);
    let fresh = game.board().clone();
    game.apply_move(PlayerNumber::One, &[c(0, 2)], c(0, 2))
        .expect("accepted");
    assert_ne!(game.board(), &fresh);

    let removed = game.remove_player(bob).expect("bob seated");

    assert_eq!(removed.player_number, PlayerNumber::Two);
    assert_eq!(game.board(), &fresh);
    assert_eq!(game.current_player(), PlayerNumber::One);
    assert_eq!(game.last_move(), None);
    assert!(game.players().iter().all(|player| player.score == 0));
    assert!(game.is_waiting_for_opponent());
}

#[test]
fn themes_only_apply_to_the_requesting_seat() {
    let (mut game, _, _) = seated(Orientation::Standard, 8);
    assert_eq!(
        game.set_theme(PlayerNumber::One, PlayerNumber::Two, "Forest"),
        Err(GameError::InvalidTheme)
    );
    assert_eq!(
        game.set_theme(PlayerNumber::One, PlayerNumber::One, "   "),
        Err(GameError::InvalidTheme)
    );
    game.set_theme(PlayerNumber::One, PlayerNumber::One, " Forest ")
        .expect("theme");
    assert_eq!(
        game.player(PlayerNumber::One).expect("one").theme.as_deref(),
        Some("Forest")
    );
}
