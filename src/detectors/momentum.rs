//! Short-term momentum detector.

use super::{mean, Detector};
use crate::indicators::IndicatorSet;
use crate::types::PriceSeries;

/// Fires on strictly increasing closes over the window with the latest
/// volume above the window average.
pub struct Momentum {
    pub window: usize,
}

impl Default for Momentum {
    fn default() -> Self {
        Self { window: 5 }
    }
}

impl Detector for Momentum {
    fn id(&self) -> &'static str {
        "momentum"
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
        let recent = &closes[n - self.window..];
        let rising = recent.windows(2).all(|pair| pair[1] > pair[0]);
        if !rising {
            return false;
        }

        let volumes = series.volumes();
        let recent_volumes = &volumes[n - self.window..];
        volumes[n - 1] > mean(recent_volumes)
    }
}
