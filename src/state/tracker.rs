//! Tracks which classification state each symbol is in and for how long

use serde::Serialize;
use std::collections::HashMap;

/// The latest inferred price behavior for a symbol.
///
/// EXPLOSIVE and HOT alerts both map to `Up`; only LOW maps to `Down`.
/// That asymmetric mapping is load-bearing for duration continuity: a
/// symbol flipping between EXPLOSIVE and HOT keeps accruing time in `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceState {
    Up,
    Down,
    Stagnant,
    Neutral,
}

#[derive(Debug, Clone, Copy)]
struct StateEntry {
    state: PriceState,
    started_at: f64,
}

/// Per-symbol state machine, lazily populated, lives for the process.
#[derive(Debug, Default)]
pub struct StateTracker {
    states: HashMap<String, StateEntry>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `new_state` for `symbol` and return the elapsed seconds in
    /// that state: 0 when the state just changed (or was unset), otherwise
    /// `now - start`.
    pub fn transition(&mut self, symbol: &str, new_state: PriceState, now: f64) -> f64 {
        match self.states.get_mut(symbol) {
            Some(entry) if entry.state == new_state => now - entry.started_at,
            Some(entry) => {
                entry.state = new_state;
                entry.started_at = now;
                0.0
            }
            None => {
                self.states.insert(
                    symbol.to_string(),
                    StateEntry {
                        state: new_state,
                        started_at: now,
                    },
                );
                0.0
            }
        }
    }

    /// Current state for diagnostics; `None` until first classification.
    pub fn current(&self, symbol: &str) -> Option<PriceState> {
        self.states.get(symbol).map(|e| e.state)
    }
}
