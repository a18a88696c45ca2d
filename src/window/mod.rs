//! Rolling price windows

pub mod price_window;

pub use price_window::*;
