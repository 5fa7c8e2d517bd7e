use shared::{
    domain::{Cell, Coord, Orientation, PlayerNumber},
    error::GameError,
    protocol::BoardGrid,
};

/// Ownership threshold per supported `(orientation, size)` pair.
const WIN_PERCENTAGES: &[(Orientation, usize, u32)] = &[
    (Orientation::Standard, 4, 75),
    (Orientation::Standard, 8, 70),
    (Orientation::Standard, 12, 65),
    (Orientation::Standard, 20, 60),
    (Orientation::Checkerboard, 4, 80),
    (Orientation::Checkerboard, 8, 75),
    (Orientation::Checkerboard, 12, 70),
    (Orientation::Checkerboard, 20, 65),
    (Orientation::TopBottomSplit, 4, 80),
    (Orientation::TopBottomSplit, 8, 75),
    (Orientation::TopBottomSplit, 12, 70),
    (Orientation::TopBottomSplit, 20, 65),
    (Orientation::Islands, 12, 70),
    (Orientation::Islands, 20, 65),
];

const LARGE_ISLAND: &[&str] = &["XXX..", "XXXX.", "XXXXX", ".XXX."];
const SMALL_ISLAND: &[&str] = &[".X.", "XXX", ".XX", ".X."];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Neutral; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn total_tiles(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|index| self.cells[index])
    }

    /// Writes `cell` at `coord`; returns false when `coord` is off the board.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        match self.index(coord) {
            Some(index) => {
                self.cells[index] = cell;
                true
            }
            None => false,
        }
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|candidate| **candidate == cell).count()
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(index, cell)| {
            let x = (index / self.size) as i32;
            let y = (index % self.size) as i32;
            (Coord::new(x, y), *cell)
        })
    }

    pub fn grid(&self) -> BoardGrid {
        self.cells
            .chunks(self.size.max(1))
            .map(<[Cell]>::to_vec)
            .collect()
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        (x < self.size && y < self.size).then(|| x * self.size + y)
    }
}

/// A validated `(orientation, size)` pair and the threshold that ends its game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub orientation: Orientation,
    pub size: usize,
    pub win_percentage: u32,
}

impl BoardConfig {
    pub fn new(orientation: Orientation, size: usize) -> Result<Self, GameError> {
        WIN_PERCENTAGES
            .iter()
            .find(|(candidate, candidate_size, _)| *candidate == orientation && *candidate_size == size)
            .map(|(_, _, win_percentage)| Self {
                orientation,
                size,
                win_percentage: *win_percentage,
            })
            .ok_or(GameError::UnsupportedBoard { orientation, size })
    }

    pub fn supported() -> impl Iterator<Item = BoardConfig> {
        WIN_PERCENTAGES
            .iter()
            .map(|(orientation, size, win_percentage)| BoardConfig {
                orientation: *orientation,
                size: *size,
                win_percentage: *win_percentage,
            })
    }

    pub fn build(&self) -> Board {
        let mut board = Board::new(self.size);
        match self.orientation {
            Orientation::Standard => {}
            Orientation::Checkerboard => fill_checkerboard(&mut board),
            Orientation::TopBottomSplit => fill_top_bottom_split(&mut board, true),
            Orientation::Islands => {
                fill_top_bottom_split(&mut board, false);
                stamp_islands(&mut board);
            }
        }
        board
    }
}

/// Builds the initial board for a pair, returning it with its win threshold.
pub fn build(orientation: Orientation, size: usize) -> Result<(Board, u32), GameError> {
    let config = BoardConfig::new(orientation, size)?;
    Ok((config.build(), config.win_percentage))
}

fn checker_block_side(size: usize) -> usize {
    match size {
        0..=8 => 2,
        9..=12 => 3,
        _ => 5,
    }
}

fn fill_checkerboard(board: &mut Board) {
    let block = checker_block_side(board.size());
    for x in 0..board.size() {
        for y in 0..board.size() {
            let owner = if (x / block + y / block) % 2 == 0 {
                PlayerNumber::One
            } else {
                PlayerNumber::Two
            };
            board.set(Coord::new(x as i32, y as i32), Cell::Owned(owner));
        }
    }
}

fn fill_top_bottom_split(board: &mut Board, flip_borders: bool) {
    let size = board.size();
    let half = size / 2;
    for x in 0..size {
        let (owner, first_row, last_row) = if x < half {
            (PlayerNumber::One, 0, half.saturating_sub(1))
        } else {
            (PlayerNumber::Two, half, size - 1)
        };
        for y in 0..size {
            let on_border = x == first_row || x == last_row || y == 0 || y == size - 1;
            let cell_owner = if flip_borders && on_border {
                owner.opponent()
            } else {
                owner
            };
            board.set(Coord::new(x as i32, y as i32), Cell::Owned(cell_owner));
        }
    }
}

fn stamp_islands(board: &mut Board) {
    let half = (board.size() / 2) as i32;
    let placements = [
        (PlayerNumber::One, LARGE_ISLAND, Coord::new(half + 1, 1)),
        (PlayerNumber::One, SMALL_ISLAND, Coord::new(half + 1, half + 1)),
        (PlayerNumber::Two, SMALL_ISLAND, Coord::new(1, 1)),
        (PlayerNumber::Two, LARGE_ISLAND, Coord::new(1, half + 1)),
    ];
    for (owner, pattern, origin) in placements {
        stamp(board, pattern, origin, owner);
    }
}

fn stamp(board: &mut Board, pattern: &[&str], origin: Coord, owner: PlayerNumber) {
    let size = board.size() as i32;
    let center = [size / 2 - 1, size / 2];
    for (dx, row) in pattern.iter().enumerate() {
        for (dy, mark) in row.chars().enumerate() {
            if mark != 'X' {
                continue;
            }
            let coord = origin.offset(dx as i32, dy as i32);
            let on_outer_ring =
                coord.x <= 0 || coord.y <= 0 || coord.x >= size - 1 || coord.y >= size - 1;
            if on_outer_ring {
                continue;
            }
            if center.contains(&coord.y) {
                board.set(coord, Cell::Neutral);
                continue;
            }
            board.set(coord, Cell::Owned(owner));
        }
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
