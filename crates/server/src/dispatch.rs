use shared::{
    domain::ConnectionId,
    error::{ApiError, ErrorCode},
    protocol::{ClientEvent, ServerEvent},
};
use tracing::{info, warn};

use crate::app_state::Lobby;

/// Applies one client event and delivers whatever it produced.
///
/// Rejected joins are answered with an `error` event to the sender only;
/// every other rejection is logged and otherwise dropped silently.
pub(crate) fn handle_event(lobby: &mut Lobby, connection: ConnectionId, event: ClientEvent) {
    let (name, reply_on_error, result) = match event {
        ClientEvent::Join {
            name,
            board_orientation,
            board_size,
            room_key,
        } => (
            "join",
            true,
            lobby
                .sessions
                .join(
                    connection,
                    &name,
                    board_orientation,
                    board_size,
                    room_key.as_deref(),
                )
                .map(|joined| joined.outbound),
        ),
        ClientEvent::Move {
            selected_tiles,
            clicked_tile,
            ..
        } => (
            "move",
            false,
            lobby
                .sessions
                .submit_move(connection, &selected_tiles, clicked_tile),
        ),
        ClientEvent::RequestThemeChange {
            player_number,
            theme,
        } => (
            "requestThemeChange",
            false,
            lobby
                .sessions
                .change_theme(connection, player_number, &theme),
        ),
        ClientEvent::TileHover { x, y, cursor_shape } => (
            "tileHover",
            false,
            lobby.sessions.hover(connection, x, y, cursor_shape),
        ),
        ClientEvent::TileHoverOut => ("tileHoverOut", false, lobby.sessions.hover_out(connection)),
    };

    match result {
        Ok(outbound) => lobby.deliver(outbound),
        Err(error) if reply_on_error => {
            warn!(%connection, event = name, %error, "request rejected");
            lobby.reply(connection, ServerEvent::Error(error.into()));
        }
        Err(error) => info!(%connection, event = name, %error, "event dropped"),
    }
}

pub(crate) fn handle_malformed(lobby: &Lobby, connection: ConnectionId, error: &serde_json::Error) {
    warn!(%connection, %error, "malformed client frame");
    lobby.reply(
        connection,
        ServerEvent::Error(ApiError::new(
            ErrorCode::Validation,
            format!("invalid message: {error}"),
        )),
    );
}

pub(crate) fn handle_disconnect(lobby: &mut Lobby, connection: ConnectionId) {
    let outbound = lobby.sessions.disconnect(connection);
    lobby.unregister(connection);
    lobby.deliver(outbound);
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
