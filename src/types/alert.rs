//! Alert records emitted to the gateway

use serde::Serialize;
use std::fmt;

/// Alert severity, ordered by the classifier's priority ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Explosive,
    Hot,
    Low,
    Stagnant,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Explosive => write!(f, "EXPLOSIVE"),
            AlertLevel::Hot => write!(f, "HOT"),
            AlertLevel::Low => write!(f, "LOW"),
            AlertLevel::Stagnant => write!(f, "STAGNANT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub symbol: String,
    pub level: AlertLevel,
    /// Range percentage over the 5-minute window, rounded to 3 decimals.
    pub vol5m: f64,
    /// Whole seconds spent in the current classification state.
    pub duration: u64,
    #[serde(rename = "durationText")]
    pub duration_text: String,
}
