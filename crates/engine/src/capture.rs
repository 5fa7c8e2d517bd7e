use shared::{
    domain::{Cell, Coord, PlayerNumber},
    protocol::CaptureGroups,
};

use crate::board::Board;

const CARDINAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Cardinal directions first, then diagonals.
const NEIGHBOURS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Claims `selected` for `mover` and runs the capture cascade.
///
/// Group 0 holds the cells actually claimed from the selection; every later
/// group holds the cells captured by one cascade wave, seeded by the group
/// before it. An empty selection (everything off-board or already owned)
/// yields no groups at all.
pub fn apply_move(board: &mut Board, mover: PlayerNumber, selected: &[Coord]) -> CaptureGroups {
    let mut origin = Vec::with_capacity(selected.len());
    for &coord in selected {
        if claimable(board, coord, mover) {
            board.set(coord, Cell::Owned(mover));
            origin.push(coord);
        }
    }
    if origin.is_empty() {
        return Vec::new();
    }

    let mut seeds = origin.clone();
    let mut groups = vec![origin];
    loop {
        let wave = capture_wave(board, mover, &seeds);
        if wave.is_empty() {
            break;
        }
        groups.push(wave.clone());
        seeds = wave;
    }
    groups
}

/// True when at least 3 of the 4 cardinal neighbours of `coord` belong to
/// `player`. Diagonals never count.
pub fn is_surrounded(board: &Board, coord: Coord, player: PlayerNumber) -> bool {
    CARDINAL
        .iter()
        .filter(|(dx, dy)| board.get(coord.offset(*dx, *dy)) == Some(Cell::Owned(player)))
        .count()
        >= 3
}

fn claimable(board: &Board, coord: Coord, mover: PlayerNumber) -> bool {
    matches!(board.get(coord), Some(cell) if !cell.is_owned_by(mover))
}

fn capture_wave(board: &mut Board, mover: PlayerNumber, seeds: &[Coord]) -> Vec<Coord> {
    let mut captured = Vec::new();
    for seed in seeds {
        for (dx, dy) in NEIGHBOURS {
            let candidate = seed.offset(dx, dy);
            if claimable(board, candidate, mover) && is_surrounded(board, candidate, mover) {
                board.set(candidate, Cell::Owned(mover));
                captured.push(candidate);
            }
        }
    }
    captured
}

#[cfg(test)]
#[path = "tests/capture_tests.rs"]
mod tests;
