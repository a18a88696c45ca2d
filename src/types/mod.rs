//! Core data types and wire structures

pub mod tick;
pub mod alert;
pub mod message;

pub use tick::*;
pub use alert::*;
pub use message::*;
