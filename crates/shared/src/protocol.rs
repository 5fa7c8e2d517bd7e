use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    domain::{Cell, Coord, CursorShape, Orientation, Player, PlayerNumber},
    error::ApiError,
};

/// Row-major board as sent to clients: `board[x][y]`.
pub type BoardGrid = Vec<Vec<Cell>>;

/// Ordered capture waves of one move; index 0 is the player's own selection.
pub type CaptureGroups = Vec<Vec<Coord>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    Join {
        name: String,
        board_orientation: Orientation,
        #[serde(deserialize_with = "board_size_from_number_or_string")]
        board_size: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room_key: Option<String>,
    },
    Move {
        /// Echo of the client's own player record. Identity is taken from the
        /// connection, so this is never trusted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player: Option<serde_json::Value>,
        #[serde(default)]
        selected_tiles: Vec<Coord>,
        clicked_tile: Coord,
    },
    RequestThemeChange {
        player_number: PlayerNumber,
        theme: String,
    },
    TileHover {
        x: i32,
        y: i32,
        cursor_shape: CursorShape,
    },
    /// Carries no fields; `payload` may be omitted or `null`.
    TileHoverOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    AssignPlayer {
        player: Player,
        waiting_for_opponent: bool,
    },
    InitializeBoard {
        board: BoardGrid,
        current_player_number: PlayerNumber,
        players: Vec<Player>,
        win_percentage: u32,
    },
    UpdateGame {
        board: BoardGrid,
        players: Vec<Player>,
        current_player_number: PlayerNumber,
        last_flipped_tile: Option<Coord>,
        capture_groups: CaptureGroups,
        waiting_for_opponent: bool,
        win_percentage: u32,
    },
    PlayerDisconnected {
        board: BoardGrid,
        players: Vec<Player>,
        current_player_number: PlayerNumber,
        waiting_for_opponent: bool,
    },
    ThemeChange {
        player_number: PlayerNumber,
        players: Vec<Player>,
    },
    GameOver {
        winner: Player,
        players: Vec<Player>,
    },
    Spectator {},
    TileHover {
        player_number: PlayerNumber,
        x: i32,
        y: i32,
        cursor_shape: CursorShape,
        tiles: Vec<Coord>,
    },
    TileHoverOut {
        player_number: PlayerNumber,
    },
    Error(ApiError),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::AssignPlayer { .. } => "assignPlayer",
            ServerEvent::InitializeBoard { .. } => "initializeBoard",
            ServerEvent::UpdateGame { .. } => "updateGame",
            ServerEvent::PlayerDisconnected { .. } => "playerDisconnected",
            ServerEvent::ThemeChange { .. } => "themeChange",
            ServerEvent::GameOver { .. } => "gameOver",
            ServerEvent::Spectator {} => "spectator",
            ServerEvent::TileHover { .. } => "tileHover",
            ServerEvent::TileHoverOut { .. } => "tileHoverOut",
            ServerEvent::Error(_) => "error",
        }
    }
}

/// Board size selects send the size as a string; scripted clients send a number.
fn board_size_from_number_or_string<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSize {
        Number(usize),
        Text(String),
    }

    match RawSize::deserialize(deserializer)? {
        RawSize::Number(size) => Ok(size),
        RawSize::Text(text) => text
            .trim()
            .parse::<usize>()
            .map_err(|_| serde::de::Error::custom(format!("invalid board size '{text}'"))),
    }
}
