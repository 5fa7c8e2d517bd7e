use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use shared::{domain::ConnectionId, protocol::ClientEvent};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod dispatch;

use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The log filter comes from settings, so settings problems go through a
    // temporary stderr subscriber until the real one is installed.
    let bootstrap = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .finish();
    let settings = tracing::subscriber::with_default(bootstrap, load_settings);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let addr: SocketAddr = settings.server_bind.parse()?;
    let state = Arc::new(AppState::new(settings));
    spawn_room_eviction(state.clone());
    let app = build_router(state);

    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

fn spawn_room_eviction(state: Arc<AppState>) {
    let Some(ttl_seconds) = state.settings.room_idle_ttl_seconds else {
        return;
    };
    let Some(ttl) = chrono::Duration::try_seconds(ttl_seconds) else {
        warn!(ttl_seconds, "room idle ttl out of range; eviction disabled");
        return;
    };
    let period = Duration::from_secs(state.settings.eviction_interval_seconds);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = state
                .lobby
                .lock()
                .await
                .sessions
                .evict_idle(chrono::Utc::now(), ttl);
            if !evicted.is_empty() {
                info!(count = evicted.len(), "evicted idle rooms");
            }
        }
    });
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

async fn ws_connection(state: Arc<AppState>, socket: WebSocket) {
    let connection = ConnectionId::new_v4();
    let (mut sender, mut receiver) = socket.split();
    let (outbox, mut events_rx) = mpsc::unbounded_channel();
    {
        let mut lobby = state.lobby.lock().await;
        lobby.register(connection, outbox);
        debug!(%connection, connections = lobby.connection_count(), "connection opened");
    }

    let send_task = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(v) => v,
                Err(_) => continue,
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = receiver.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        let mut lobby = state.lobby.lock().await;
        match serde_json::from_str::<ClientEvent>(&text) {
            Ok(event) => dispatch::handle_event(&mut lobby, connection, event),
            Err(error) => dispatch::handle_malformed(&lobby, connection, &error),
        }
    }

    dispatch::handle_disconnect(&mut *state.lobby.lock().await, connection);
    debug!(%connection, "connection closed");
    send_task.abort();
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
