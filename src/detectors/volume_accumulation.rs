//! Volume-accumulation detector.

use super::{mean, Detector};
use crate::indicators::IndicatorSet;
use crate::types::PriceSeries;

/// Fires when recent volume expands against the prior stretch while price
/// holds and up-day volume dominates.
pub struct VolumeAccumulation {
    /// Recent 10-bar mean volume must exceed this multiple of the
    /// preceding 10-bar mean.
    pub surge_ratio: f64,
}

impl Default for VolumeAccumulation {
    fn default() -> Self {
        Self { surge_ratio: 1.2 }
    }
}

impl VolumeAccumulation {
    /// Sum of volume on bars that closed above the prior close, within
    /// `[start, end)`. Bar 0 has no prior close and never counts.
    fn up_volume(series: &PriceSeries, start: usize, end: usize) -> f64 {
        let mut total = 0.0;
        for i in start..end {
            if i == 0 {
                continue;
            }
            if series[i].close > series[i - 1].close {
                total += series[i].volume;
            }
        }
        total
    }
}

impl Detector for VolumeAccumulation {
    fn id(&self) -> &'static str {
        "volume_accumulation"
    }

    fn min_bars(&self) -> usize {
        20
    }

    fn detect(&self, series: &PriceSeries, _indicators: &IndicatorSet) -> bool {
        let n = series.len();
        if n < self.min_bars() {
            return false;
        }

        let volumes = series.volumes();
        let recent_avg = mean(&volumes[n - 10..]);
        let prior_avg = mean(&volumes[n - 20..n - 10]);
        if prior_avg <= 0.0 || recent_avg <= self.surge_ratio * prior_avg {
            return false;
        }

        let closes = series.closes();
        if closes[n - 1] < closes[n - 11] {
            return false;
        }

        Self::up_volume(series, n - 10, n) > Self::up_volume(series, n - 20, n - 10)
    }
}
