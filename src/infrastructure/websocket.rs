//! WebSocket handler pushing scenario notifications to clients
//!
//! Each connection subscribes to the four scenario channels when it opens and
//! receives every change published afterwards as a `ScenarioEvent`.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::application::services::ScenarioNotifier;
use crate::domain::entities::{CharacterInitiative, Monster, ScenarioState};
use crate::domain::events::ScenarioEvent;
use crate::infrastructure::state::AppState;

/// Messages from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Request the full scenario
    GetScenario,
    Ping,
}

/// Messages from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    Scenario { state: ScenarioState },
    Event { event: ScenarioEvent },
    Pong,
    Error { code: String, message: String },
}

/// Receivers for every scenario channel, taken when the client connects
struct Subscriptions {
    initiative: broadcast::Receiver<Vec<CharacterInitiative>>,
    monsters: broadcast::Receiver<Vec<Monster>>,
    global_level: broadcast::Receiver<u32>,
    rounds: broadcast::Receiver<u32>,
}

impl Subscriptions {
    fn new(notifier: &ScenarioNotifier) -> Self {
        Self {
            initiative: notifier.subscribe_initiative(),
            monsters: notifier.subscribe_monsters(),
            global_level: notifier.subscribe_global_level(),
            rounds: notifier.subscribe_rounds(),
        }
    }

    /// Wait for the next change on any channel
    ///
    /// Channels are polled in the order mutations publish on them, so the
    /// events of one mutation reach the client in publish order.
    async fn next(&mut self) -> Result<ScenarioEvent, RecvError> {
        tokio::select! {
            biased;
            r = self.monsters.recv() => r.map(ScenarioEvent::monsters_changed),
            r = self.global_level.recv() => r.map(ScenarioEvent::global_level_changed),
            r = self.rounds.recv() => r.map(ScenarioEvent::round_changed),
            r = self.initiative.recv() => r.map(ScenarioEvent::initiative_changed),
        }
    }
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let client_id = Uuid::new_v4();

    // Subscribe before anything else so no change is missed once connected
    let subscriptions = Subscriptions::new(state.scenario_service.notifier());

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    tracing::info!("New WebSocket connection established: {}", client_id);

    // Forward messages from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    let event_task = tokio::spawn(forward_events(subscriptions, tx.clone(), client_id));

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let response = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::GetScenario) => ServerMessage::Scenario {
                        state: state.scenario_service.state().await,
                    },
                    Ok(ClientMessage::Ping) => ServerMessage::Pong,
                    Err(e) => {
                        tracing::warn!("Failed to parse message: {}", e);
                        ServerMessage::Error {
                            code: "PARSE_ERROR".to_string(),
                            message: format!("Invalid message format: {}", e),
                        }
                    }
                };
                if tx.send(response).is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                tracing::info!("WebSocket connection closed by client: {}", client_id);
                break;
            }
            Err(e) => {
                tracing::error!("WebSocket error for client {}: {}", client_id, e);
                break;
            }
            _ => {}
        }
    }

    event_task.abort();
    send_task.abort();

    tracing::info!("WebSocket connection terminated: {}", client_id);
}

async fn forward_events(
    mut subscriptions: Subscriptions,
    tx: mpsc::UnboundedSender<ServerMessage>,
    client_id: Uuid,
) {
    loop {
        match subscriptions.next().await {
            Ok(event) => {
                if tx.send(ServerMessage::Event { event }).is_err() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Client {} lagged, skipped {} notifications", client_id, skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
