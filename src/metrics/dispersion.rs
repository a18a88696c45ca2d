//! Range-over-mean dispersion, the engine's sole volatility measure
//!
//! Both the volatility metric and the stagnation detector share one
//! computation, parameterized only by their minimum sample counts
//! (10 vs 20). Range-based dispersion is deliberately simple, robust to
//! outlier count rather than outlier magnitude.

use crate::config::{MIN_SAMPLES_STAGNATION, MIN_SAMPLES_VOLATILITY, STAGNANT_RANGE_PCT};
use crate::window::PriceWindow;

/// `(max - min) / mean * 100` over the given prices, or `None` when there
/// are fewer than `min_samples` prices or the mean is exactly zero.
pub fn range_pct<I>(prices: I, min_samples: usize) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;

    for price in prices {
        count += 1;
        sum += price;
        if price < min {
            min = price;
        }
        if price > max {
            max = price;
        }
    }

    if count < min_samples {
        return None;
    }

    let mean = sum / count as f64;
    if mean == 0.0 {
        return None;
    }

    Some((max - min) / mean * 100.0)
}

/// Range percentage over the window, requiring at least 10 samples.
pub fn volatility_range_pct(window: &PriceWindow) -> Option<f64> {
    range_pct(window.prices(), MIN_SAMPLES_VOLATILITY)
}

/// True iff the window holds at least 20 samples and its range percentage
/// is strictly below 0.05%.
pub fn is_stagnant(window: &PriceWindow) -> bool {
    matches!(
        range_pct(window.prices(), MIN_SAMPLES_STAGNATION),
        Some(v) if v < STAGNANT_RANGE_PCT
    )
}
