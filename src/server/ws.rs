//! WebSocket endpoint feeding the signal engine

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::engine::SignalEngine;
use crate::types::{InboundMessage, OutboundMessage};

pub const HANDSHAKE_MSG: &str = "signal engine connected";

/// Shared boundary state. The engine sits behind a single mutex so that
/// concurrent connections are serialized into one ingest path; none of the
/// per-symbol structures tolerate concurrent mutation.
pub struct AppState {
    pub engine: Mutex<SignalEngine>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            engine: Mutex::new(SignalEngine::from_config(config)),
        }
    }
}

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("✅ Gateway connected to signal engine");

    let greeting = OutboundMessage::Status {
        ok: true,
        msg: HANDSHAKE_MSG.to_string(),
    };
    match serde_json::to_string(&greeting) {
        Ok(json) => {
            if socket.send(Message::Text(json.into())).await.is_err() {
                return;
            }
        }
        Err(e) => {
            error!("Failed to serialize handshake: {e}");
            return;
        }
    }

    while let Some(msg) = socket.recv().await {
        match msg {
            Ok(Message::Text(text)) => {
                let inbound = match serde_json::from_str::<InboundMessage>(&text) {
                    Ok(inbound) => inbound,
                    Err(e) => {
                        debug!("Ignoring unparseable frame: {e}");
                        continue;
                    }
                };
                let InboundMessage::Ticks { ticks } = inbound else {
                    continue;
                };

                debug!("📊 Received {} ticks from gateway", ticks.len());
                let now = Utc::now().timestamp_millis() as f64 / 1000.0;
                let alerts = state.engine.lock().await.process_batch(&ticks, now);
                if alerts.is_empty() {
                    continue;
                }

                info!("📤 Sending {} alerts to gateway", alerts.len());
                let outbound = OutboundMessage::Alerts { alerts };
                match serde_json::to_string(&outbound) {
                    Ok(json) => {
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => error!("Failed to serialize alert batch: {e}"),
                }
            }
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }

    info!("Gateway connection closed");
}
