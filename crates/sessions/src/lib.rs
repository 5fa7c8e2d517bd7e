//! Room matchmaking and per-room event fan-out.
//!
//! Every operation runs to completion against one room and returns the
//! events it produced, already addressed to the connections that must
//! receive them. Callers serialise access to the registry.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use engine::{shapes, BoardConfig, GameState, MoveOutcome};
use shared::{
    domain::{ConnectionId, Coord, CursorShape, Orientation, PlayerNumber, RoomId},
    error::GameError,
    protocol::ServerEvent,
};
use tracing::{debug, info};

/// One event for one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub connection: ConnectionId,
    pub event: ServerEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Player(PlayerNumber),
    Spectator,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Joined {
    pub room_id: RoomId,
    pub seat: Seat,
    pub outbound: Vec<Outbound>,
}

#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    key: Option<String>,
    game: GameState,
    spectators: Vec<ConnectionId>,
    last_activity: DateTime<Utc>,
}

impl Room {
    fn new(id: RoomId, key: Option<String>, config: BoardConfig, now: DateTime<Utc>) -> Self {
        Self {
            id,
            key,
            game: GameState::new(config),
            spectators: Vec::new(),
            last_activity: now,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn spectators(&self) -> &[ConnectionId] {
        &self.spectators
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn is_empty(&self) -> bool {
        self.game.players().is_empty() && self.spectators.is_empty()
    }

    /// Players first, in seat order, then spectators in join order.
    pub fn members(&self) -> Vec<ConnectionId> {
        self.game
            .players()
            .iter()
            .map(|player| player.connection)
            .chain(self.spectators.iter().copied())
            .collect()
    }

    fn broadcast(&self, event: ServerEvent) -> Vec<Outbound> {
        self.members()
            .into_iter()
            .map(|connection| Outbound {
                connection,
                event: event.clone(),
            })
            .collect()
    }

    fn broadcast_except(&self, sender: ConnectionId, event: ServerEvent) -> Vec<Outbound> {
        self.members()
            .into_iter()
            .filter(|connection| *connection != sender)
            .map(|connection| Outbound {
                connection,
                event: event.clone(),
            })
            .collect()
    }

    fn update_event(&self, last_flipped_tile: Option<Coord>, capture_groups: Vec<Vec<Coord>>) -> ServerEvent {
        ServerEvent::UpdateGame {
            board: self.game.board().grid(),
            players: self.game.players().to_vec(),
            current_player_number: self.game.current_player(),
            last_flipped_tile,
            capture_groups,
            waiting_for_opponent: self.game.is_waiting_for_opponent(),
            win_percentage: self.game.config().win_percentage,
        }
    }

    fn initialize_event(&self) -> ServerEvent {
        ServerEvent::InitializeBoard {
            board: self.game.board().grid(),
            current_player_number: self.game.current_player(),
            players: self.game.players().to_vec(),
            win_percentage: self.game.config().win_percentage,
        }
    }

    fn disconnected_event(&self) -> ServerEvent {
        ServerEvent::PlayerDisconnected {
            board: self.game.board().grid(),
            players: self.game.players().to_vec(),
            current_player_number: self.game.current_player(),
            waiting_for_opponent: self.game.is_waiting_for_opponent(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionRegistry {
    rooms: BTreeMap<RoomId, Room>,
    memberships: HashMap<ConnectionId, (RoomId, Seat)>,
    next_room_id: u64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.get(&room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn membership(&self, connection: ConnectionId) -> Option<(RoomId, Seat)> {
        self.memberships.get(&connection).copied()
    }

    /// Places a connection in a room, creating one when nothing matches.
    ///
    /// A keyed join lands in the open room with that key, or spectates the
    /// newest room with that key when all of them are full. An unkeyed join
    /// takes any open unkeyed room. The board configuration is validated up
    /// front and only used when a room is created.
    pub fn join(
        &mut self,
        connection: ConnectionId,
        name: &str,
        orientation: Orientation,
        size: usize,
        room_key: Option<&str>,
    ) -> Result<Joined, GameError> {
        let config = BoardConfig::new(orientation, size)?;
        if self.memberships.contains_key(&connection) {
            return Err(GameError::AlreadyJoined);
        }
        let key = room_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        let now = Utc::now();

        let room_id = match self.find_room(key.as_deref()) {
            Some(room_id) => room_id,
            None => self.create_room(key, config, now),
        };
        let Some(room) = self.rooms.get_mut(&room_id) else {
            return Err(GameError::NotJoined);
        };
        room.last_activity = now;

        match room.game.add_player(connection, name) {
            Ok(player) => {
                let seat = Seat::Player(player.player_number);
                self.memberships.insert(connection, (room_id, seat));
                let mut outbound = vec![Outbound {
                    connection,
                    event: ServerEvent::AssignPlayer {
                        player: player.clone(),
                        waiting_for_opponent: room.game.is_waiting_for_opponent(),
                    },
                }];
                if room.game.is_full() {
                    outbound.extend(room.broadcast(room.initialize_event()));
                }
                outbound.extend(room.broadcast(room.update_event(room.game.last_move(), Vec::new())));
                info!(%room_id, %connection, player = %player.player_number, "player joined");
                Ok(Joined {
                    room_id,
                    seat,
                    outbound,
                })
            }
            Err(GameError::RoomFull) => {
                room.spectators.push(connection);
                self.memberships.insert(connection, (room_id, Seat::Spectator));
                let outbound = vec![
                    Outbound {
                        connection,
                        event: ServerEvent::Spectator {},
                    },
                    Outbound {
                        connection,
                        event: room.update_event(room.game.last_move(), Vec::new()),
                    },
                ];
                info!(%room_id, %connection, "spectator joined");
                Ok(Joined {
                    room_id,
                    seat: Seat::Spectator,
                    outbound,
                })
            }
            Err(error) => Err(error),
        }
    }

    /// Applies a move from `connection` and fans out the new snapshot.
    pub fn submit_move(
        &mut self,
        connection: ConnectionId,
        selected: &[Coord],
        clicked: Coord,
    ) -> Result<Vec<Outbound>, GameError> {
        let (room, mover) = self.player_room_mut(connection)?;
        let MoveOutcome {
            clicked,
            capture_groups,
            winner,
            ..
        } = room.game.apply_move(mover, selected, clicked)?;
        room.last_activity = Utc::now();

        let mut outbound = room.broadcast(room.update_event(Some(clicked), capture_groups));
        if let Some(winner) = winner {
            info!(room_id = %room.id, winner = %winner.player_number, score = winner.score, "game over");
            outbound.extend(room.broadcast(ServerEvent::GameOver {
                winner,
                players: room.game.players().to_vec(),
            }));
        }
        Ok(outbound)
    }

    pub fn change_theme(
        &mut self,
        connection: ConnectionId,
        player_number: PlayerNumber,
        theme: &str,
    ) -> Result<Vec<Outbound>, GameError> {
        let (room, seat) = self.player_room_mut(connection)?;
        room.game.set_theme(seat, player_number, theme)?;
        room.last_activity = Utc::now();
        Ok(room.broadcast(ServerEvent::ThemeChange {
            player_number,
            players: room.game.players().to_vec(),
        }))
    }

    /// Relays a player's cursor preview to everyone else in the room.
    pub fn hover(
        &mut self,
        connection: ConnectionId,
        x: i32,
        y: i32,
        cursor_shape: CursorShape,
    ) -> Result<Vec<Outbound>, GameError> {
        let (room, seat) = self.player_room_mut(connection)?;
        let origin = Coord::new(x, y);
        if !room.game.board().contains(origin) {
            return Err(GameError::OutOfBounds { x, y });
        }
        let tiles = shapes::footprint(cursor_shape, origin, room.game.board().size());
        Ok(room.broadcast_except(
            connection,
            ServerEvent::TileHover {
                player_number: seat,
                x,
                y,
                cursor_shape,
                tiles,
            },
        ))
    }

    pub fn hover_out(&mut self, connection: ConnectionId) -> Result<Vec<Outbound>, GameError> {
        let (room, seat) = self.player_room_mut(connection)?;
        Ok(room.broadcast_except(
            connection,
            ServerEvent::TileHoverOut { player_number: seat },
        ))
    }

    /// Drops a connection. Losing a player resets the room for whoever is left.
    pub fn disconnect(&mut self, connection: ConnectionId) -> Vec<Outbound> {
        let Some((room_id, seat)) = self.memberships.remove(&connection) else {
            return Vec::new();
        };
        let Some(room) = self.rooms.get_mut(&room_id) else {
            return Vec::new();
        };
        room.last_activity = Utc::now();

        match seat {
            Seat::Spectator => {
                room.spectators.retain(|spectator| *spectator != connection);
                debug!(%room_id, %connection, "spectator left");
                Vec::new()
            }
            Seat::Player(number) => {
                room.game.remove_player(connection);
                info!(%room_id, %connection, player = %number, "player left; room reset");
                room.broadcast(room.disconnected_event())
            }
        }
    }

    /// Removes rooms nobody is connected to whose last activity is at least
    /// `ttl` old. Returns the evicted ids.
    pub fn evict_idle(&mut self, now: DateTime<Utc>, ttl: Duration) -> Vec<RoomId> {
        let evicted: Vec<RoomId> = self
            .rooms
            .values()
            .filter(|room| room.is_empty() && now - room.last_activity >= ttl)
            .map(Room::id)
            .collect();
        for room_id in &evicted {
            self.rooms.remove(room_id);
        }
        evicted
    }

    fn find_room(&self, key: Option<&str>) -> Option<RoomId> {
        let mut candidates = self.rooms.values().filter(|room| room.key() == key);
        match key {
            Some(_) => {
                let candidates: Vec<&Room> = candidates.collect();
                candidates
                    .iter()
                    .find(|room| !room.game.is_full())
                    .or_else(|| candidates.last())
                    .map(|room| room.id)
            }
            None => candidates.find(|room| !room.game.is_full()).map(Room::id),
        }
    }

    fn create_room(&mut self, key: Option<String>, config: BoardConfig, now: DateTime<Utc>) -> RoomId {
        self.next_room_id += 1;
        let room_id = RoomId(self.next_room_id);
        info!(
            %room_id,
            orientation = %config.orientation,
            size = config.size,
            keyed = key.is_some(),
            "room created"
        );
        self.rooms.insert(room_id, Room::new(room_id, key, config, now));
        room_id
    }

    fn player_room_mut(&mut self, connection: ConnectionId) -> Result<(&mut Room, PlayerNumber), GameError> {
        let (room_id, seat) = self
            .memberships
            .get(&connection)
            .copied()
            .ok_or(GameError::NotJoined)?;
        let Seat::Player(number) = seat else {
            return Err(GameError::NotAPlayer);
        };
        let room = self.rooms.get_mut(&room_id).ok_or(GameError::NotJoined)?;
        Ok((room, number))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
