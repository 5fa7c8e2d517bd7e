use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub $inner);
    };
}

id_newtype!(RoomId, u64);
id_newtype!(ConnectionId, Uuid);

impl ConnectionId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room-{}", self.0)
    }
}

/// Seat of a player inside a room. Serialized as the bare number `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerNumber {
    One,
    Two,
}

impl PlayerNumber {
    pub const ALL: [PlayerNumber; 2] = [PlayerNumber::One, PlayerNumber::Two];

    pub fn as_u8(self) -> u8 {
        match self {
            PlayerNumber::One => 1,
            PlayerNumber::Two => 2,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerNumber::One => PlayerNumber::Two,
            PlayerNumber::Two => PlayerNumber::One,
        }
    }
}

impl TryFrom<u8> for PlayerNumber {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerNumber::One),
            2 => Ok(PlayerNumber::Two),
            other => Err(format!("player number must be 1 or 2, got {other}")),
        }
    }
}

impl From<PlayerNumber> for u8 {
    fn from(value: PlayerNumber) -> Self {
        value.as_u8()
    }
}

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player{}", self.as_u8())
    }
}

/// One board position. On the wire a neutral cell is `null`, an owned cell is
/// the owner's player number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<PlayerNumber>", into = "Option<PlayerNumber>")]
pub enum Cell {
    #[default]
    Neutral,
    Owned(PlayerNumber),
}

impl Cell {
    pub fn is_owned_by(self, player: PlayerNumber) -> bool {
        self == Cell::Owned(player)
    }
}

impl From<Option<PlayerNumber>> for Cell {
    fn from(value: Option<PlayerNumber>) -> Self {
        value.map_or(Cell::Neutral, Cell::Owned)
    }
}

impl From<Cell> for Option<PlayerNumber> {
    fn from(value: Cell) -> Self {
        match value {
            Cell::Neutral => None,
            Cell::Owned(player) => Some(player),
        }
    }
}

/// Board coordinate; `x` is the row and `y` the column. Signed so that
/// off-board client input survives decoding and can be rejected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Standard,
    Checkerboard,
    TopBottomSplit,
    Islands,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Standard,
        Orientation::Checkerboard,
        Orientation::TopBottomSplit,
        Orientation::Islands,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Standard => "standard",
            Orientation::Checkerboard => "checkerboard",
            Orientation::TopBottomSplit => "topBottomSplit",
            Orientation::Islands => "islands",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Orientation::ALL
            .into_iter()
            .find(|orientation| orientation.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown board orientation '{s}'"))
    }
}

/// Hover cursor footprints offered by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorShape {
    #[serde(rename = "singleTile")]
    SingleTile,
    #[serde(rename = "plus")]
    Plus,
    T,
    L,
    LPlus,
    #[serde(rename = "checker")]
    Checker,
    #[serde(rename = "lineHorizontal")]
    LineHorizontal,
    #[serde(rename = "lineDiagonalUp")]
    LineDiagonalUp,
    #[serde(rename = "lineVertical")]
    LineVertical,
    #[serde(rename = "lineDiagonalDown")]
    LineDiagonalDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(rename = "id")]
    pub connection: ConnectionId,
    pub name: String,
    pub player_number: PlayerNumber,
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Player {
    pub fn new(connection: ConnectionId, name: impl Into<String>, player_number: PlayerNumber) -> Self {
        Self {
            connection,
            name: name.into(),
            player_number,
            score: 0,
            theme: None,
        }
    }
}
