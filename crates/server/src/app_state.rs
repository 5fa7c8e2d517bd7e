use std::collections::HashMap;

use sessions::{Outbound, SessionRegistry};
use shared::{domain::ConnectionId, protocol::ServerEvent};
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::config::Settings;

pub(crate) struct AppState {
    pub(crate) lobby: Mutex<Lobby>,
    pub(crate) settings: Settings,
}

impl AppState {
    pub(crate) fn new(settings: Settings) -> Self {
        Self {
            lobby: Mutex::new(Lobby::default()),
            settings,
        }
    }
}

/// The room registry plus one outbound queue per live connection. Held under
/// a single lock so every event is applied and fanned out before the next.
#[derive(Default)]
pub(crate) struct Lobby {
    pub(crate) sessions: SessionRegistry,
    outboxes: HashMap<ConnectionId, mpsc::UnboundedSender<ServerEvent>>,
}

impl Lobby {
    pub(crate) fn register(&mut self, connection: ConnectionId, outbox: mpsc::UnboundedSender<ServerEvent>) {
        self.outboxes.insert(connection, outbox);
    }

    pub(crate) fn unregister(&mut self, connection: ConnectionId) {
        self.outboxes.remove(&connection);
    }

    pub(crate) fn connection_count(&self) -> usize {
        self.outboxes.len()
    }

    pub(crate) fn reply(&self, connection: ConnectionId, event: ServerEvent) {
        self.deliver(vec![Outbound { connection, event }]);
    }

    pub(crate) fn deliver(&self, outbound: Vec<Outbound>) {
        for Outbound { connection, event } in outbound {
            let Some(outbox) = self.outboxes.get(&connection) else {
                continue;
            };
            let name = event.name();
            if outbox.send(event).is_err() {
                debug!(%connection, event = name, "dropping event for closed connection");
            }
        }
    }
}
