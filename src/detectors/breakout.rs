//! Resistance breakout detector.

use super::Detector;
use crate::indicators::IndicatorSet;
use crate::types::PriceSeries;

/// Fires when today's high clears the prior `lookback`-bar high by a
/// margin.
pub struct Breakout {
    pub lookback: usize,
    /// Minimum clearance above the prior high, as a fraction.
    pub min_break: f64,
}

impl Default for Breakout {
    fn default() -> Self {
        Self {
            lookback: 20,
            min_break: 0.02,
        }
    }
}

impl Detector for Breakout {
    fn id(&self) -> &'static str {
        "breakout"
    }

    fn min_bars(&self) -> usize {
        self.lookback + 1
    }

    fn detect(&self, series: &PriceSeries, _indicators: &IndicatorSet) -> bool {
        let n = series.len();
        if n < self.min_bars() {
            return false;
        }

        let highs = series.highs();
        // Prior window excludes today.
        let prior_high = highs[n - 1 - self.lookback..n - 1]
            .iter()
            .copied()
            .fold(f64::MIN, f64::max);
        if prior_high <= 0.0 {
            return false;
        }

        highs[n - 1] >= prior_high * (1.0 + self.min_break)
    }
}
