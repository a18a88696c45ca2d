//! Engine configuration settings and environment variable handling

use std::env;

// Rolling window constants
pub const WINDOW_SECS: f64 = 300.0; // 5 minute window
pub const MIN_SAMPLES_VOLATILITY: usize = 10;
pub const MIN_SAMPLES_STAGNATION: usize = 20; // stricter, avoids false stagnation on sparse data

// Classification thresholds, all on the range percentage.
// These are part of the alert wire contract and stay compile-time constants.
pub const EXPLOSIVE_THRESHOLD_PCT: f64 = 0.8;
pub const HOT_THRESHOLD_PCT: f64 = 0.3;
pub const LOW_THRESHOLD_PCT: f64 = 0.1;
pub const STAGNANT_RANGE_PCT: f64 = 0.05;

// Alert suppression
pub const ALERT_COOLDOWN_SECS: f64 = 10.0;

// Server defaults
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3002;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    pub window_secs: f64,
    pub cooldown_secs: f64,
}

impl Config {
    pub fn load() -> Self {
        Self {
            bind: env::var("ENGINE_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            port: env::var("ENGINE_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            window_secs: env::var("ENGINE_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(WINDOW_SECS)
                .max(1.0),
            cooldown_secs: env::var("ENGINE_ALERT_COOLDOWN_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(ALERT_COOLDOWN_SECS)
                .max(0.0),
        }
    }
}
