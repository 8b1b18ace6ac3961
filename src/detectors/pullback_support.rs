//! Pullback-to-support detector.

use super::{mean, Detector};
use crate::indicators::IndicatorSet;
use crate::types::PriceSeries;

/// Fires when an intact uptrend pulls back to the 20-bar average on
/// drying volume.
pub struct PullbackSupport {
    /// Maximum distance of the close from SMA-20, as a fraction.
    pub max_distance: f64,
    /// Trailing-5-bar average volume must sit below this fraction of the
    /// trailing-20-bar average.
    pub volume_contraction: f64,
}

impl Default for PullbackSupport {
    fn default() -> Self {
        Self {
            max_distance: 0.03,
            volume_contraction: 0.8,
        }
    }
}

impl Detector for PullbackSupport {
    fn id(&self) -> &'static str {
        "pullback_support"
    }

    fn min_bars(&self) -> usize {
        50
    }

    fn detect(&self, series: &PriceSeries, indicators: &IndicatorSet) -> bool {
        let n = series.len();
        if n < self.min_bars() {
            return false;
        }

        let (sma20, sma50) = match (indicators.latest_sma20(), indicators.latest_sma50()) {
            (Some(fast), Some(slow)) => (fast, slow),
            _ => return false,
        };
        // Uptrend intact.
        if sma20 <= sma50 || sma20 <= 0.0 {
            return false;
        }

        let close = match series.latest() {
            Some(bar) => bar.close,
            None => return false,
        };
        if (close - sma20).abs() / sma20 >= self.max_distance {
            return false;
        }

        let volumes = series.volumes();
        let avg5 = mean(&volumes[n - 5..]);
        let avg20 = mean(&volumes[n - 20..]);
        avg20 > 0.0 && avg5 < self.volume_contraction * avg20
    }
}
