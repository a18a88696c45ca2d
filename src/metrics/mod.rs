//! Dispersion metrics over a price window

pub mod dispersion;

pub use dispersion::*;
