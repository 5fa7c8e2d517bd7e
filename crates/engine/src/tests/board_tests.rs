use super::*;

fn owner_at(board: &Board, x: i32, y: i32) -> Cell {
    board.get(Coord::new(x, y)).expect("on board")
}

#[test]
fn every_supported_pair_builds_a_full_deterministic_board() {
    for config in BoardConfig::supported() {
        let (board, win_percentage) = build(config.orientation, config.size).expect("supported");
        assert_eq!(board.total_tiles(), config.size * config.size);
        assert_eq!(board.grid().len(), config.size);
        assert!(board.grid().iter().all(|row| row.len() == config.size));
        assert_eq!(win_percentage, config.win_percentage);
        assert!(win_percentage > 50 && win_percentage <= 100);

        let (again, again_threshold) = build(config.orientation, config.size).expect("supported");
        assert_eq!(board, again, "{} {}", config.orientation, config.size);
        assert_eq!(win_percentage, again_threshold);
    }
}

#[test]
fn unsupported_pairs_are_rejected() {
    assert_eq!(
        BoardConfig::new(Orientation::Standard, 10),
        Err(GameError::UnsupportedBoard {
            orientation: Orientation::Standard,
            size: 10
        })
    );
    assert!(BoardConfig::new(Orientation::Islands, 4).is_err());
    assert!(BoardConfig::new(Orientation::Islands, 8).is_err());
}

#[test]
fn standard_board_is_all_neutral() {
    let (board, _) = build(Orientation::Standard, 8).expect("board");
    assert_eq!(board.count(Cell::Neutral), 64);
}

#[test]
fn checkerboard_alternates_two_by_two_blocks_on_small_boards() {
    let (board, _) = build(Orientation::Checkerboard, 8).expect("board");
    let one = Cell::Owned(PlayerNumber::One);
    let two = Cell::Owned(PlayerNumber::Two);
    assert_eq!(owner_at(&board, 0, 0), one);
    assert_eq!(owner_at(&board, 1, 1), one);
    assert_eq!(owner_at(&board, 0, 2), two);
    assert_eq!(owner_at(&board, 2, 0), two);
    assert_eq!(owner_at(&board, 3, 3), one);
    assert_eq!(board.count(one), 32);
    assert_eq!(board.count(two), 32);
}

#[test]
fn checkerboard_uses_five_wide_blocks_on_twenty() {
    let (board, _) = build(Orientation::Checkerboard, 20).expect("board");
    assert_eq!(owner_at(&board, 4, 4), Cell::Owned(PlayerNumber::One));
    assert_eq!(owner_at(&board, 4, 5), Cell::Owned(PlayerNumber::Two));
    assert_eq!(owner_at(&board, 5, 5), Cell::Owned(PlayerNumber::One));
}

#[test]
fn top_bottom_split_flips_each_half_border() {
    let (board, _) = build(Orientation::TopBottomSplit, 8).expect("board");
    let one = Cell::Owned(PlayerNumber::One);
    let two = Cell::Owned(PlayerNumber::Two);

    // top half interior and its flipped ring
    assert_eq!(owner_at(&board, 1, 1), one);
    assert_eq!(owner_at(&board, 2, 6), one);
    assert_eq!(owner_at(&board, 0, 3), two);
    assert_eq!(owner_at(&board, 3, 3), two);
    assert_eq!(owner_at(&board, 2, 0), two);
    assert_eq!(owner_at(&board, 2, 7), two);

    // bottom half interior and its flipped ring
    assert_eq!(owner_at(&board, 5, 3), two);
    assert_eq!(owner_at(&board, 4, 3), one);
    assert_eq!(owner_at(&board, 7, 3), one);
    assert_eq!(owner_at(&board, 5, 0), one);
    assert_eq!(board.count(Cell::Neutral), 0);
}

#[test]
fn islands_stamp_into_the_opponent_half_and_keep_buffers() {
    let (board, _) = build(Orientation::Islands, 12).expect("board");
    let one = Cell::Owned(PlayerNumber::One);
    let two = Cell::Owned(PlayerNumber::Two);

    // no border flip: the outer ring keeps the plain split owner
    assert_eq!(owner_at(&board, 0, 0), one);
    assert_eq!(owner_at(&board, 11, 11), two);

    // player one's large island inside the bottom half
    assert_eq!(owner_at(&board, 7, 1), one);
    assert_eq!(owner_at(&board, 9, 4), one);
    // player two's small island inside the top half
    assert_eq!(owner_at(&board, 2, 1), two);
    assert_eq!(owner_at(&board, 1, 2), two);
    // stamps that land in the centre columns become neutral buffer
    assert_eq!(owner_at(&board, 9, 5), Cell::Neutral);
    // stamps on the outer ring are skipped
    assert_eq!(owner_at(&board, 3, 11), one);

    let neutral = board.count(Cell::Neutral);
    assert!(neutral > 0);
    assert_eq!(board.count(one) + board.count(two) + neutral, 144);
}

#[test]
fn off_board_coordinates_are_not_addressable() {
    let mut board = Board::new(4);
    assert!(board.get(Coord::new(-1, 0)).is_none());
    assert!(board.get(Coord::new(0, 4)).is_none());
    assert!(!board.set(Coord::new(4, 4), Cell::Owned(PlayerNumber::One)));
    assert!(board.set(Coord::new(3, 3), Cell::Owned(PlayerNumber::One)));
    assert_eq!(board.count(Cell::Owned(PlayerNumber::One)), 1);
}
