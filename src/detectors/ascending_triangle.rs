//! Ascending-triangle detector.

use super::{mean, std_dev, Detector};
use crate::indicators::IndicatorSet;
use crate::types::PriceSeries;

/// Fires on a flat resistance line with rising support lows and price
/// pressing the resistance.
pub struct AscendingTriangle {
    /// Bars in the formation window.
    pub window: usize,
    /// Maximum stdev/mean of the last 10 highs.
    pub max_resistance_wobble: f64,
    /// Minimum rise of the last-5-low mean over the first-5-low mean.
    pub min_support_slope: f64,
    /// Price must reach this fraction of resistance.
    pub min_proximity: f64,
}

impl Default for AscendingTriangle {
    fn default() -> Self {
        Self {
            window: 30,
            max_resistance_wobble: 0.05,
            min_support_slope: 0.02,
            min_proximity: 0.95,
        }
    }
}

impl Detector for AscendingTriangle {
    fn id(&self) -> &'static str {
        "ascending_triangle"
    }

    fn min_bars(&self) -> usize {
        self.window
    }

    fn detect(&self, series: &PriceSeries, _indicators: &IndicatorSet) -> bool {
        let n = series.len();
        if n < self.min_bars() {
            return false;
        }

        let highs = series.highs();
        let resistance_window = &highs[n - 10..];
        let resistance_mean = mean(resistance_window);
        if resistance_mean <= 0.0 {
            return false;
        }
        // Resistance nearly flat.
        if std_dev(resistance_window) / resistance_mean >= self.max_resistance_wobble {
            return false;
        }

        let lows = series.lows();
        let window_lows = &lows[n - self.window..];
        let early_mean = mean(&window_lows[..5]);
        let late_mean = mean(&window_lows[window_lows.len() - 5..]);
        if early_mean <= 0.0 || (late_mean - early_mean) / early_mean <= self.min_support_slope {
            return false;
        }

        let resistance = resistance_window.iter().copied().fold(f64::MIN, f64::max);
        let close = match series.latest() {
            Some(bar) => bar.close,
            None => return false,
        };
        close >= self.min_proximity * resistance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bar, PriceSeries};
    use chrono::NaiveDate;

    /// Flat highs at 110 with lows climbing from 100 toward 108.
    fn triangle_series(support_slope: f64) -> PriceSeries {
        let bars = (0..30)
            .map(|i| {
                let low = 100.0 + i as f64 * support_slope;
                let close = if i == 29 { 109.0 } else { (low + 110.0) / 2.0 };
                Bar {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                        + chrono::Days::new(i as u64),
                    open: close,
                    high: 110.0,
                    low,
                    close,
                    volume: 1000.0,
                }
            })
            .collect();
        PriceSeries::new(bars)
    }

    #[test]
    fn test_triangle_fires() {
        let s = triangle_series(0.25);
        let indicators = IndicatorSet::compute(&s);
        assert!(AscendingTriangle::default().detect(&s, &indicators));
    }

    #[test]
    fn test_flat_support_does_not_fire() {
        let s = triangle_series(0.0);
        let indicators = IndicatorSet::compute(&s);
        assert!(!AscendingTriangle::default().detect(&s, &indicators));
    }

    #[test]
    fn test_far_from_resistance_does_not_fire() {
        let bars = (0..30)
            .map(|i| {
                let low = 80.0 + i as f64 * 0.5;
                Bar {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                        + chrono::Days::new(i as u64),
                    open: low + 1.0,
                    high: 110.0,
                    low,
                    close: low + 1.0,
                    volume: 1000.0,
                }
            })
            .collect();
        let s = PriceSeries::new(bars);
        let indicators = IndicatorSet::compute(&s);
        assert!(!AscendingTriangle::default().detect(&s, &indicators));
    }

    #[test]
    fn test_short_series_is_false() {
        let s = triangle_series(0.25);
        let short = PriceSeries::new(s.bars()[..20].to_vec());
        let indicators = IndicatorSet::compute(&short);
        assert!(!AscendingTriangle::default().detect(&short, &indicators));
    }
}
