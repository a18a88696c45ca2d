//! Volatility Alert Engine - rolling-window price analysis for tick streams
//!
//! Ingests batches of price ticks over a WebSocket boundary, maintains a
//! 5-minute rolling price window per symbol, and emits EXPLOSIVE / HOT /
//! LOW / STAGNANT alerts whenever the range-based volatility percentage
//! crosses its thresholds.

pub mod config;
pub mod types;
pub mod errors;
pub mod window;
pub mod metrics;
pub mod state;
pub mod engine;
pub mod server;
pub mod utils;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{EngineError, EngineResult};
pub use types::*;
