//! Alert classification and batch ingest

pub mod classifier;
pub mod duration;

pub use classifier::*;
pub use duration::*;
