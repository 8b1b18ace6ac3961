//! Gap-up open detector.

use super::Detector;
use crate::indicators::IndicatorSet;
use crate::types::PriceSeries;

/// Fires when today's open gaps above yesterday's close.
pub struct GapUp {
    /// Minimum gap as a fraction of yesterday's close.
    pub min_gap: f64,
}

impl Default for GapUp {
    fn default() -> Self {
        Self { min_gap: 0.02 }
    }
}

impl Detector for GapUp {
    fn id(&self) -> &'static str {
        "gap_up"
    }

    fn min_bars(&self) -> usize {
        2
    }

    fn detect(&self, series: &PriceSeries, _indicators: &IndicatorSet) -> bool {
        let n = series.len();
        if n < self.min_bars() {
            return false;
        }

        let yesterday_close = series[n - 2].close;
        if yesterday_close <= 0.0 {
            return false;
        }

        let today_open = series[n - 1].open;
        (today_open - yesterday_close) / yesterday_close >= self.min_gap
    }
}
