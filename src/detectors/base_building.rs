//! Base-building (tight consolidation) detector.

use super::{mean, Detector};
use crate::indicators::IndicatorSet;
use crate::types::PriceSeries;

/// Fires on a tight 15-bar range with drying volume and price lifting off
/// the base low.
pub struct BaseBuilding {
    /// Maximum (max − min) / mean over the last 15 closes.
    pub max_range: f64,
    /// Last-15-bar mean volume must sit below this fraction of the
    /// preceding 15-bar mean.
    pub volume_dry_up: f64,
    /// Close must exceed this multiple of the 15-bar low.
    pub min_lift: f64,
}

impl Default for BaseBuilding {
    fn default() -> Self {
        Self {
            max_range: 0.08,
            volume_dry_up: 0.9,
            min_lift: 1.02,
        }
    }
}

impl Detector for BaseBuilding {
    fn id(&self) -> &'static str {
        "base_building"
    }

    fn min_bars(&self) -> usize {
        30
    }

    fn detect(&self, series: &PriceSeries, _indicators: &IndicatorSet) -> bool {
        let n = series.len();
        if n < self.min_bars() {
            return false;
        }

        let closes = series.closes();
        let base = &closes[n - 15..];
        let base_mean = mean(base);
        if base_mean <= 0.0 {
            return false;
        }
        let base_min = base.iter().copied().fold(f64::MAX, f64::min);
        let base_max = base.iter().copied().fold(f64::MIN, f64::max);
        if (base_max - base_min) / base_mean >= self.max_range {
            return false;
        }

        let volumes = series.volumes();
        let recent_avg = mean(&volumes[n - 15..]);
        let prior_avg = mean(&volumes[n - 30..n - 15]);
        if prior_avg <= 0.0 || recent_avg >= self.volume_dry_up * prior_avg {
            return false;
        }

        closes[n - 1] > self.min_lift * base_min
    }
}
