//! Custom error types for the engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed tick for {symbol}: {reason}")]
    MalformedTick {
        symbol: String,
        reason: String,
    },

    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Configuration error: {context}")]
    Config {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
