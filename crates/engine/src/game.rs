use shared::{
    domain::{ConnectionId, Coord, Player, PlayerNumber},
    error::GameError,
    protocol::CaptureGroups,
};
use tracing::debug;

use crate::{
    board::{Board, BoardConfig},
    capture, scoring,
    turn::TurnScheduler,
};

const MAX_THEME_LEN: usize = 32;
const MAX_NAME_LEN: usize = 32;
const DEFAULT_NAME: &str = "Player";

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mover: PlayerNumber,
    pub clicked: Coord,
    pub capture_groups: CaptureGroups,
    /// Set when this move ended the game.
    pub winner: Option<Player>,
}

/// Everything one room plays on: the board, its seated players, the turn and
/// the locked last move.
#[derive(Debug, Clone)]
pub struct GameState {
    config: BoardConfig,
    board: Board,
    players: Vec<Player>,
    turn: TurnScheduler,
    last_move: Option<Coord>,
    winner: Option<PlayerNumber>,
}

impl GameState {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            board: config.build(),
            players: Vec::with_capacity(2),
            turn: TurnScheduler::default(),
            last_move: None,
            winner: None,
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> PlayerNumber {
        self.turn.current()
    }

    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    pub fn winner(&self) -> Option<PlayerNumber> {
        self.winner
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= 2
    }

    pub fn is_waiting_for_opponent(&self) -> bool {
        !self.is_full()
    }

    pub fn player(&self, number: PlayerNumber) -> Option<&Player> {
        self.players.iter().find(|player| player.player_number == number)
    }

    pub fn seat_of(&self, connection: ConnectionId) -> Option<PlayerNumber> {
        self.players
            .iter()
            .find(|player| player.connection == connection)
            .map(|player| player.player_number)
    }

    /// Seats a new player in the lowest free slot. The name is trimmed and
    /// cut to 32 characters; a blank name becomes "Player".
    pub fn add_player(&mut self, connection: ConnectionId, name: &str) -> Result<Player, GameError> {
        let number = PlayerNumber::ALL
            .into_iter()
            .find(|number| self.player(*number).is_none())
            .ok_or(GameError::RoomFull)?;
        let player = Player::new(connection, display_name(name), number);
        self.players.push(player.clone());
        self.players.sort_by_key(|player| player.player_number);
        Ok(player)
    }

    /// Unseats a player. Dropping below two players resets the game.
    pub fn remove_player(&mut self, connection: ConnectionId) -> Option<Player> {
        let index = self
            .players
            .iter()
            .position(|player| player.connection == connection)?;
        let removed = self.players.remove(index);
        if !self.is_full() {
            self.reset();
        }
        Some(removed)
    }

    /// Regenerates the board for the room's configuration and clears all
    /// per-game state; seated players keep their seats.
    pub fn reset(&mut self) {
        self.board = self.config.build();
        self.turn.reset();
        self.last_move = None;
        self.winner = None;
        for player in &mut self.players {
            player.score = 0;
        }
    }

    pub fn set_theme(
        &mut self,
        seat: PlayerNumber,
        requested: PlayerNumber,
        theme: &str,
    ) -> Result<(), GameError> {
        let theme = theme.trim();
        if seat != requested || theme.is_empty() || theme.chars().count() > MAX_THEME_LEN {
            return Err(GameError::InvalidTheme);
        }
        let player = self
            .players
            .iter_mut()
            .find(|player| player.player_number == seat)
            .ok_or(GameError::NotAPlayer)?;
        player.theme = Some(theme.to_string());
        Ok(())
    }

    /// Validates and applies one move: capture cascade, score recompute, win
    /// check, then the turn passes.
    pub fn apply_move(
        &mut self,
        mover: PlayerNumber,
        selected: &[Coord],
        clicked: Coord,
    ) -> Result<MoveOutcome, GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        if self.is_waiting_for_opponent() {
            return Err(GameError::WaitingForOpponent);
        }
        if !self.turn.is_turn_of(mover) {
            return Err(GameError::OutOfTurn);
        }
        if !self.board.contains(clicked) {
            return Err(GameError::OutOfBounds {
                x: clicked.x,
                y: clicked.y,
            });
        }
        if self.last_move == Some(clicked) {
            return Err(GameError::LockedTile {
                x: clicked.x,
                y: clicked.y,
            });
        }

        let capture_groups = capture::apply_move(&mut self.board, mover, selected);
        self.last_move = Some(clicked);

        let scores = scoring::calculate(&self.board);
        for player in &mut self.players {
            player.score = scores.get(player.player_number);
        }

        self.winner = scoring::detect_winner(scores, self.config.win_percentage);
        let winner = self.winner.and_then(|number| self.player(number).cloned());
        self.turn.advance(self.players.len());

        debug!(
            %mover,
            waves = capture_groups.len(),
            player_one = scores.player_one,
            player_two = scores.player_two,
            "move applied"
        );

        Ok(MoveOutcome {
            mover,
            clicked,
            capture_groups,
            winner,
        })
    }
}

fn display_name(raw: &str) -> String {
    match raw.trim() {
        "" => DEFAULT_NAME.to_string(),
        trimmed => trimmed.chars().take(MAX_NAME_LEN).collect(),
    }
}

#[cfg(test)]
#[path = "tests/game_tests.rs"]
mod tests;
