use shared::domain::{Cell, PlayerNumber};

use crate::board::Board;

/// Ownership percentages of both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scores {
    pub player_one: u32,
    pub player_two: u32,
}

impl Scores {
    pub fn get(&self, player: PlayerNumber) -> u32 {
        match player {
            PlayerNumber::One => self.player_one,
            PlayerNumber::Two => self.player_two,
        }
    }

    fn get_mut(&mut self, player: PlayerNumber) -> &mut u32 {
        match player {
            PlayerNumber::One => &mut self.player_one,
            PlayerNumber::Two => &mut self.player_two,
        }
    }

    pub fn total(&self) -> u32 {
        self.player_one + self.player_two
    }
}

/// Recomputes both scores from a full scan of `board`.
///
/// Each score is `owned / total * 100` rounded half up. Rounding both
/// players independently can overshoot, so the score that was rounded up the
/// most gives back a point until the sum is at most 100, and below 100 while
/// any neutral cell remains.
pub fn calculate(board: &Board) -> Scores {
    let total = board.total_tiles() as u64;
    if total == 0 {
        return Scores::default();
    }

    let owned = |player| board.count(Cell::Owned(player)) as u64;
    let mut scores = Scores::default();
    for player in PlayerNumber::ALL {
        *scores.get_mut(player) = ((owned(player) * 200 + total) / (2 * total)) as u32;
    }

    let cap = if board.count(Cell::Neutral) == 0 { 100 } else { 99 };
    while scores.total() > cap {
        // rounding error in units of 1/total of a percentage point
        let overshoot = |player: PlayerNumber| {
            i64::from(scores.get(player)) * total as i64 - (owned(player) * 100) as i64
        };
        let (one, two) = (overshoot(PlayerNumber::One), overshoot(PlayerNumber::Two));
        let giver = if one > two || (one == two && owned(PlayerNumber::One) < owned(PlayerNumber::Two)) {
            PlayerNumber::One
        } else {
            PlayerNumber::Two
        };
        let score = scores.get_mut(giver);
        *score = score.saturating_sub(1);
    }
    scores
}

/// Returns the winner once any score reaches `win_percentage`.
///
/// When both players qualify the strictly higher score wins; an exact tie goes
/// to player two.
pub fn detect_winner(scores: Scores, win_percentage: u32) -> Option<PlayerNumber> {
    let one = scores.player_one >= win_percentage;
    let two = scores.player_two >= win_percentage;
    match (one, two) {
        (false, false) => None,
        (true, false) => Some(PlayerNumber::One),
        (false, true) => Some(PlayerNumber::Two),
        (true, true) if scores.player_one > scores.player_two => Some(PlayerNumber::One),
        (true, true) => Some(PlayerNumber::Two),
    }
}
