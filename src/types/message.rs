//! WebSocket wire messages exchanged with the gateway

use serde::{Deserialize, Serialize};

use super::{Alert, Tick};

/// Messages received from the gateway. Unknown `type` values are not an
/// error; they deserialize to `Unknown` and are ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "ticks")]
    Ticks { ticks: Vec<Tick> },
    #[serde(other)]
    Unknown,
}

/// Messages sent back to the gateway.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    #[serde(rename = "alerts")]
    Alerts { alerts: Vec<Alert> },
    #[serde(rename = "status")]
    Status { ok: bool, msg: String },
}
