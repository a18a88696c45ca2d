//! Per-symbol classification state tracking

pub mod tracker;

pub use tracker::*;
