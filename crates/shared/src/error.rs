use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    OutOfTurn,
    OutOfBounds,
    Conflict,
    Validation,
    NotFound,
    Internal,
}

/// Error payload sent back to the connection that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("it is not this player's turn")]
    OutOfTurn,
    #[error("the room is still waiting for an opponent")]
    WaitingForOpponent,
    #[error("spectators cannot act on the board")]
    NotAPlayer,
    #[error("tile ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },
    #[error("tile ({x}, {y}) was the last move and is locked")]
    LockedTile { x: i32, y: i32 },
    #[error("unsupported board: orientation {orientation} with size {size}")]
    UnsupportedBoard { orientation: Orientation, size: usize },
    #[error("connection already joined a room")]
    AlreadyJoined,
    #[error("connection has not joined a room")]
    NotJoined,
    #[error("the game is already over")]
    GameOver,
    #[error("invalid theme request")]
    InvalidTheme,
    #[error("room is full")]
    RoomFull,
}

impl GameError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::OutOfTurn | GameError::WaitingForOpponent | GameError::GameOver => {
                ErrorCode::OutOfTurn
            }
            GameError::OutOfBounds { .. } => ErrorCode::OutOfBounds,
            GameError::LockedTile { .. } | GameError::AlreadyJoined | GameError::RoomFull => {
                ErrorCode::Conflict
            }
            GameError::UnsupportedBoard { .. } | GameError::InvalidTheme => ErrorCode::Validation,
            GameError::NotAPlayer | GameError::NotJoined => ErrorCode::NotFound,
        }
    }
}

impl From<GameError> for ApiError {
    fn from(value: GameError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}
