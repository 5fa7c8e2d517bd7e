use shared::domain::PlayerNumber;

/// Whose move it is in one room. Starts with player one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnScheduler {
    current: PlayerNumber,
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self {
            current: PlayerNumber::One,
        }
    }
}

impl TurnScheduler {
    pub fn current(&self) -> PlayerNumber {
        self.current
    }

    pub fn is_turn_of(&self, player: PlayerNumber) -> bool {
        self.current == player
    }

    /// Moves to `(current mod player_count) + 1`.
    pub fn advance(&mut self, player_count: usize) -> PlayerNumber {
        let next = usize::from(self.current.as_u8()) % player_count.clamp(1, 2) + 1;
        self.current = if next == 2 {
            PlayerNumber::Two
        } else {
            PlayerNumber::One
        };
        self.current
    }

    pub fn reset(&mut self) {
        self.current = PlayerNumber::One;
    }
}
