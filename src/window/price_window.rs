//! Time-bounded rolling buffer of price samples for a single symbol

use std::collections::VecDeque;

/// One retained price observation, timestamp in seconds since epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub ts: f64,
    pub price: f64,
}

/// Time-ordered buffer of samples, bounded only by age. Samples older than
/// `window_secs` relative to the latest inserted timestamp are evicted from
/// the front after each insertion.
///
/// Insertion order is trusted to be time-ordered; out-of-order ticks are
/// appended as-is, never sorted.
#[derive(Debug, Clone)]
pub struct PriceWindow {
    samples: VecDeque<Sample>,
    window_secs: f64,
}

impl PriceWindow {
    pub fn new(window_secs: f64) -> Self {
        PriceWindow {
            samples: VecDeque::new(),
            window_secs,
        }
    }

    /// Append a sample and evict expired ones. The eviction boundary is
    /// exclusive on the low side: a sample exactly `window_secs` old is kept.
    pub fn add(&mut self, ts_ms: i64, price: f64) {
        let ts = ts_ms as f64 / 1000.0;
        self.samples.push_back(Sample { ts, price });

        let cutoff = ts - self.window_secs;
        while let Some(front) = self.samples.front() {
            if front.ts < cutoff {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.price)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
