//! The per-tick alert decision logic

use std::collections::HashMap;
use tracing::{info, warn};

use crate::config::{
    Config, EXPLOSIVE_THRESHOLD_PCT, HOT_THRESHOLD_PCT, LOW_THRESHOLD_PCT,
};
use crate::engine::format_duration;
use crate::errors::{EngineError, EngineResult};
use crate::metrics;
use crate::state::{PriceState, StateTracker};
use crate::types::{Alert, AlertLevel, Tick};
use crate::window::PriceWindow;

/// Owns all per-symbol state: rolling windows, the classification state
/// tracker, and the alert cooldown map. Single-writer by design; callers
/// must serialize batches before they reach this engine.
pub struct SignalEngine {
    window_secs: f64,
    cooldown_secs: f64,
    windows: HashMap<String, PriceWindow>,
    tracker: StateTracker,
    last_alert: HashMap<String, f64>,
}

impl SignalEngine {
    pub fn new(window_secs: f64, cooldown_secs: f64) -> Self {
        SignalEngine {
            window_secs,
            cooldown_secs,
            windows: HashMap::new(),
            tracker: StateTracker::new(),
            last_alert: HashMap::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.window_secs, config.cooldown_secs)
    }

    /// Process one inbound batch sequentially, in input order. Malformed
    /// ticks are skipped before any state mutation; the rest of the batch
    /// continues. Alerts come back in per-tick processing order.
    pub fn process_batch(&mut self, ticks: &[Tick], now: f64) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for tick in ticks {
            match self.process_tick(tick, now) {
                Ok(Some(alert)) => alerts.push(alert),
                Ok(None) => {}
                Err(e) => warn!("Skipping tick: {e}"),
            }
        }
        alerts
    }

    /// Run one tick through window update, cooldown gate, and the
    /// classification ladder. Returns an alert when a severity fired.
    pub fn process_tick(&mut self, tick: &Tick, now: f64) -> EngineResult<Option<Alert>> {
        if !tick.price.is_finite() || tick.price <= 0.0 {
            return Err(EngineError::MalformedTick {
                symbol: tick.symbol.clone(),
                reason: format!("price {} is not a positive finite number", tick.price),
            });
        }

        let window = self
            .windows
            .entry(tick.symbol.clone())
            .or_insert_with(|| PriceWindow::new(self.window_secs));
        window.add(tick.ts, tick.price);

        let Some(vol5m) = metrics::volatility_range_pct(window) else {
            // Not enough samples yet (or zero mean); not an error.
            return Ok(None);
        };

        // Cooldown gates both the alert and the state transition, so a
        // symbol's state duration freezes while the cooldown is active.
        let last = self
            .last_alert
            .get(&tick.symbol)
            .copied()
            .unwrap_or(f64::NEG_INFINITY);
        if now - last < self.cooldown_secs {
            return Ok(None);
        }

        let (state, level) = classify(vol5m, window);
        let duration = self.tracker.transition(&tick.symbol, state, now);

        let Some(level) = level else {
            return Ok(None);
        };

        log_alert(level, &tick.symbol, vol5m, state, duration);

        self.last_alert.insert(tick.symbol.clone(), now);
        Ok(Some(Alert {
            symbol: tick.symbol.clone(),
            level,
            vol5m: round3(vol5m),
            duration: duration as u64,
            duration_text: format_duration(duration),
        }))
    }

    /// Diagnostic snapshot of a symbol's current classification state.
    pub fn current_state(&self, symbol: &str) -> Option<PriceState> {
        self.tracker.current(symbol)
    }

    /// Number of retained samples for a symbol, for diagnostics.
    pub fn sample_count(&self, symbol: &str) -> usize {
        self.windows.get(symbol).map(PriceWindow::len).unwrap_or(0)
    }
}

/// The priority ladder: first match wins.
fn classify(vol5m: f64, window: &PriceWindow) -> (PriceState, Option<AlertLevel>) {
    if vol5m >= EXPLOSIVE_THRESHOLD_PCT {
        (PriceState::Up, Some(AlertLevel::Explosive))
    } else if vol5m >= HOT_THRESHOLD_PCT {
        (PriceState::Up, Some(AlertLevel::Hot))
    } else if vol5m < LOW_THRESHOLD_PCT && vol5m > 0.0 {
        (PriceState::Down, Some(AlertLevel::Low))
    } else if metrics::is_stagnant(window) {
        (PriceState::Stagnant, Some(AlertLevel::Stagnant))
    } else {
        (PriceState::Neutral, None)
    }
}

fn log_alert(level: AlertLevel, symbol: &str, vol5m: f64, state: PriceState, duration: f64) {
    match level {
        AlertLevel::Explosive => info!(
            "🔥 EXPLOSIVE: {symbol} - {vol5m:.2}% volatility ({state:?} for {})",
            format_duration(duration)
        ),
        AlertLevel::Hot => info!(
            "⚡ HOT: {symbol} - {vol5m:.2}% volatility ({state:?} for {})",
            format_duration(duration)
        ),
        AlertLevel::Low => info!(
            "📉 LOW: {symbol} - {vol5m:.2}% volatility ({state:?} for {})",
            format_duration(duration)
        ),
        AlertLevel::Stagnant => info!(
            "💤 STAGNANT: {symbol} - price barely moved (for {})",
            format_duration(duration)
        ),
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(symbol: &str, price: f64, ts_ms: i64) -> Tick {
        Tick {
            symbol: symbol.to_string(),
            price,
            ts: ts_ms,
        }
    }

    fn window_with_prices(prices: &[f64]) -> PriceWindow {
        let mut window = PriceWindow::new(300.0);
        for (i, price) in prices.iter().enumerate() {
            window.add(i as i64 * 1000, *price);
        }
        window
    }

    #[test]
    fn threshold_boundaries() {
        let window = window_with_prices(&[100.0; 10]);
        assert_eq!(
            classify(0.8, &window),
            (PriceState::Up, Some(AlertLevel::Explosive))
        );
        assert_eq!(classify(0.79, &window), (PriceState::Up, Some(AlertLevel::Hot)));
        assert_eq!(classify(0.3, &window), (PriceState::Up, Some(AlertLevel::Hot)));
        assert_eq!(
            classify(0.09, &window),
            (PriceState::Down, Some(AlertLevel::Low))
        );
        // 0.1 is not LOW, and with a short window not STAGNANT either
        assert_eq!(classify(0.1, &window), (PriceState::Neutral, None));
        assert_eq!(classify(0.2, &window), (PriceState::Neutral, None));
    }

    #[test]
    fn zero_volatility_is_never_low() {
        // 10 identical samples: v == 0, too few for stagnation -> NEUTRAL
        let window = window_with_prices(&[100.0; 10]);
        assert_eq!(classify(0.0, &window), (PriceState::Neutral, None));

        // 20 identical samples: v == 0 falls through to STAGNANT
        let window = window_with_prices(&[100.0; 20]);
        assert_eq!(
            classify(0.0, &window),
            (PriceState::Stagnant, Some(AlertLevel::Stagnant))
        );
    }

    #[test]
    fn explosive_alert_after_ten_rising_ticks() {
        // 100 -> 102 over one second: range 2, mean ~101 -> ~1.98% EXPLOSIVE
        let mut engine = SignalEngine::new(300.0, 10.0);
        let now = 1_000.0;
        let mut alerts = Vec::new();
        for i in 0..10 {
            let price = 100.0 + 2.0 * (i as f64 / 9.0);
            let ts_ms = 1_000_000 + i * 100;
            if let Some(alert) = engine.process_tick(&tick("BTC", price, ts_ms), now).unwrap() {
                alerts.push(alert);
            }
        }
        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.symbol, "BTC");
        assert_eq!(alert.level, AlertLevel::Explosive);
        assert!((alert.vol5m - 1.98).abs() < 0.02);
        assert_eq!(alert.duration, 0);
        assert_eq!(alert.duration_text, "0s");
        assert_eq!(engine.current_state("BTC"), Some(PriceState::Up));
    }

    #[test]
    fn stagnant_batch_alerts_once_and_cooldown_suppresses_repeat() {
        let mut engine = SignalEngine::new(300.0, 10.0);
        let ticks: Vec<Tick> = (0..20)
            .map(|i| tick("ETH", 50.0, 2_000_000 + i * 100))
            .collect();

        let alerts = engine.process_batch(&ticks, 2_000.0);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].level, AlertLevel::Stagnant);
        assert_eq!(engine.current_state("ETH"), Some(PriceState::Stagnant));

        // Identical batch 5 seconds later: inside the cooldown window,
        // no alerts and no state transition.
        let more: Vec<Tick> = (0..20)
            .map(|i| tick("ETH", 50.0, 2_005_000 + i * 100))
            .collect();
        let alerts = engine.process_batch(&more, 2_005.0);
        assert!(alerts.is_empty());

        // After the cooldown expires the alert fires again, and the
        // duration reflects time since the state first started.
        let later: Vec<Tick> = (0..20)
            .map(|i| tick("ETH", 50.0, 2_015_000 + i * 100))
            .collect();
        let alerts = engine.process_batch(&later, 2_015.0);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].duration, 15);
        assert_eq!(alerts[0].duration_text, "15s");
    }

    #[test]
    fn cooldown_freezes_state_duration() {
        let mut engine = SignalEngine::new(300.0, 10.0);
        // Prime with an explosive batch at t=1000
        let ticks: Vec<Tick> = (0..10)
            .map(|i| tick("SOL", 100.0 + 2.0 * (i as f64 / 9.0), 1_000_000 + i * 100))
            .collect();
        assert_eq!(engine.process_batch(&ticks, 1_000.0).len(), 1);

        // A tick at t=1005 is inside the cooldown: no transition happens,
        // even though its volatility would classify differently.
        let calm = tick("SOL", 101.0, 1_005_000);
        assert_eq!(engine.process_tick(&calm, 1_005.0).unwrap(), None);
        assert_eq!(engine.current_state("SOL"), Some(PriceState::Up));
    }

    #[test]
    fn insufficient_samples_produce_no_transition() {
        let mut engine = SignalEngine::new(300.0, 10.0);
        for i in 0..9 {
            let result = engine
                .process_tick(&tick("ADA", 1.0 + i as f64, 3_000_000 + i * 100), 3_000.0)
                .unwrap();
            assert_eq!(result, None);
        }
        assert_eq!(engine.current_state("ADA"), None);
        assert_eq!(engine.sample_count("ADA"), 9);
    }

    #[test]
    fn malformed_ticks_are_rejected_without_state_mutation() {
        let mut engine = SignalEngine::new(300.0, 10.0);
        assert!(engine
            .process_tick(&tick("XRP", f64::NAN, 4_000_000), 4_000.0)
            .is_err());
        assert!(engine
            .process_tick(&tick("XRP", -1.0, 4_000_000), 4_000.0)
            .is_err());
        assert_eq!(engine.sample_count("XRP"), 0);

        // The rest of a batch keeps going after a malformed tick.
        let batch = vec![tick("XRP", f64::INFINITY, 4_000_000), tick("XRP", 1.0, 4_000_100)];
        let alerts = engine.process_batch(&batch, 4_000.0);
        assert!(alerts.is_empty());
        assert_eq!(engine.sample_count("XRP"), 1);
    }

    #[test]
    fn neutral_classification_does_not_refresh_cooldown() {
        let mut engine = SignalEngine::new(300.0, 10.0);
        // Ten samples with range ~0.2% of mean: NEUTRAL band
        let ticks: Vec<Tick> = (0..10)
            .map(|i| {
                let price = if i % 2 == 0 { 100.0 } else { 100.2 };
                tick("DOT", price, 5_000_000 + i * 100)
            })
            .collect();
        let alerts = engine.process_batch(&ticks, 5_000.0);
        assert!(alerts.is_empty());
        assert_eq!(engine.current_state("DOT"), Some(PriceState::Neutral));

        // Cooldown was never set, so an eligible tick right after can alert.
        let spike = tick("DOT", 110.0, 5_001_000);
        let alert = engine.process_tick(&spike, 5_001.0).unwrap();
        assert!(matches!(
            alert,
            Some(Alert {
                level: AlertLevel::Explosive,
                ..
            })
        ));
    }

    #[test]
    fn alerts_preserve_per_tick_order_across_symbols() {
        let mut engine = SignalEngine::new(300.0, 10.0);
        let mut batch = Vec::new();
        for i in 0..9 {
            batch.push(tick("AAA", 100.0 + i as f64 * 0.2, 6_000_000 + i * 100));
            batch.push(tick("BBB", 200.0 + i as f64 * 0.4, 6_000_000 + i * 100));
        }
        // Tenth samples: BBB first so its alert must come first.
        batch.push(tick("BBB", 203.6, 6_001_000));
        batch.push(tick("AAA", 101.8, 6_001_000));

        let alerts = engine.process_batch(&batch, 6_000.0);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].symbol, "BBB");
        assert_eq!(alerts[1].symbol, "AAA");
    }

    #[test]
    fn vol5m_is_rounded_to_three_decimals() {
        assert_eq!(round3(1.980198019801), 1.98);
        assert_eq!(round3(0.0499999), 0.05);
        assert_eq!(round3(0.1234), 0.123);
    }
}
