//! Inbound tick observations

use serde::{Deserialize, Serialize};

/// One (symbol, price, timestamp) observation from the gateway.
///
/// Symbols are opaque, case-sensitive identifiers; `ts` is milliseconds
/// since epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub symbol: String,
    pub price: f64,
    pub ts: i64,
}
