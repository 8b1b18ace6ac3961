//! Cup-and-handle detector.

use super::Detector;
use crate::indicators::IndicatorSet;
use crate::types::PriceSeries;

/// Fires on a rounded decline-and-recovery of proportionate depth with a
/// shallow handle near the rim.
pub struct CupHandle {
    /// Bars in the formation window.
    pub window: usize,
    /// Cup depth bounds, as fractions of the rim high.
    pub min_depth: f64,
    pub max_depth: f64,
    /// Maximum drawdown from the recent 10-bar low to the current price.
    pub max_handle_depth: f64,
    /// Required recovery above the cup low, as a fraction of cup depth.
    pub min_recovery: f64,
}

impl Default for CupHandle {
    fn default() -> Self {
        Self {
            window: 60,
            min_depth: 0.10,
            max_depth: 0.35,
            max_handle_depth: 0.20,
            min_recovery: 0.7,
        }
    }
}

impl Detector for CupHandle {
    fn id(&self) -> &'static str {
        "cup_handle"
    }

    fn min_bars(&self) -> usize {
        self.window
    }

    fn detect(&self, series: &PriceSeries, _indicators: &IndicatorSet) -> bool {
        let n = series.len();
        if n < self.min_bars() {
            return false;
        }

        let closes = series.closes();
        let window = &closes[n - self.window..];

        // Rim: maximum close in the window; cup low: minimum after it.
        let mut rim_idx = 0;
        for (i, &close) in window.iter().enumerate() {
            if close > window[rim_idx] {
                rim_idx = i;
            }
        }
        let rim_high = window[rim_idx];
        if rim_high <= 0.0 || rim_idx + 1 >= window.len() {
            return false;
        }
        let cup_low = window[rim_idx + 1..]
            .iter()
            .copied()
            .fold(f64::MAX, f64::min);

        let depth = (rim_high - cup_low) / rim_high;
        if depth < self.min_depth || depth > self.max_depth {
            return false;
        }

        let price = window[window.len() - 1];
        if price <= 0.0 {
            return false;
        }

        // Handle: drawdown from the most recent 10-bar low.
        let handle_low = window[window.len() - 10..]
            .iter()
            .copied()
            .fold(f64::MAX, f64::min);
        if (price - handle_low) / price >= self.max_handle_depth {
            return false;
        }

        price > cup_low + self.min_recovery * (rim_high - cup_low)
    }
}
