//! Oversold-bounce detector.

use super::{mean, std_dev, Detector};
use crate::indicators::IndicatorSet;
use crate::types::PriceSeries;

/// Fires when RSI sits in the oversold band and is turning up while price
/// has stabilized.
pub struct OversoldBounce {
    pub rsi_low: f64,
    pub rsi_high: f64,
    /// Maximum trailing-3-bar close standard deviation, as a fraction of
    /// the window mean.
    pub max_close_wobble: f64,
}

impl Default for OversoldBounce {
    fn default() -> Self {
        Self {
            rsi_low: 25.0,
            rsi_high: 40.0,
            max_close_wobble: 0.02,
        }
    }
}

impl Detector for OversoldBounce {
    fn id(&self) -> &'static str {
        "oversold_bounce"
    }

    fn min_bars(&self) -> usize {
        20
    }

    fn detect(&self, series: &PriceSeries, indicators: &IndicatorSet) -> bool {
        let n = series.len();
        if n < self.min_bars() {
            return false;
        }

        // RSI warm-up not satisfied short-circuits to false.
        let rsi_now = match indicators.latest_rsi() {
            Some(v) => v,
            None => return false,
        };
        if rsi_now < self.rsi_low || rsi_now > self.rsi_high {
            return false;
        }

        // Turning up: latest RSI above the value two bars back, within the
        // trailing 5-bar RSI window.
        let rsi_back = match indicators.rsi_bars_back(2) {
            Some(v) => v,
            None => return false,
        };
        if rsi_now <= rsi_back {
            return false;
        }

        let closes = series.closes();
        let tail = &closes[n - 3..];
        let tail_mean = mean(tail);
        if tail_mean <= 0.0 {
            return false;
        }
        std_dev(tail) < self.max_close_wobble * tail_mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::testutil::series;

    /// Alternating 1.0 losses and 0.5 gains settle RSI near 35, then two
    /// small gains turn it up while keeping the last closes tight.
    fn bounce_closes() -> Vec<f64> {
        let mut closes = vec![120.0];
        for _ in 0..9 {
            let last = *closes.last().unwrap();
            closes.push(last - 1.0);
            let last = *closes.last().unwrap();
            closes.push(last + 0.5);
        }
        let last = *closes.last().unwrap();
        closes.push(last + 0.3);
        let last = *closes.last().unwrap();
        closes.push(last + 0.3);
        closes
    }

    #[test]
    fn test_bounce_fires() {
        let closes = bounce_closes();
        let s = series(&closes, &vec![1000.0; closes.len()]);
        let indicators = IndicatorSet::compute(&s);
        let rsi = indicators.latest_rsi().unwrap();
        assert!(
            (25.0..=40.0).contains(&rsi),
            "fixture RSI drifted out of band: {rsi}"
        );
        assert!(OversoldBounce::default().detect(&s, &indicators));
    }

    #[test]
    fn test_falling_rsi_does_not_fire() {
        let closes: Vec<f64> = (0..25).map(|i| 150.0 - i as f64 * 2.0).collect();
        let s = series(&closes, &vec![1000.0; 25]);
        let indicators = IndicatorSet::compute(&s);
        assert!(!OversoldBounce::default().detect(&s, &indicators));
    }

    #[test]
    fn test_insufficient_rsi_warm_up_is_false() {
        let closes = vec![100.0; 20];
        let s = series(&closes[..10], &vec![1000.0; 10]);
        let indicators = IndicatorSet::compute(&s);
        assert!(!OversoldBounce::default().detect(&s, &indicators));
    }
}
