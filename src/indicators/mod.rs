//! Per-bar-aligned technical indicator series.
//!
//! Every column has the same length as the input series; entries are `None`
//! until the indicator's warm-up window is satisfied. Undefined values are
//! never treated as zero: comparisons against them short-circuit to
//! false/unavailable in the detectors and scorer.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use adx::adx_series;
pub use atr::atr_series;
pub use bollinger::bollinger_series;
pub use macd::macd_series;
pub use rsi::rsi_series;
pub use sma::sma_series;

use crate::types::{IndicatorSnapshot, PriceSeries};

/// Derived indicator columns for one price series.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    pub rsi: Vec<Option<f64>>,
    pub macd_line: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
    pub sma20: Vec<Option<f64>>,
    pub sma50: Vec<Option<f64>>,
}

impl IndicatorSet {
    /// Compute the full indicator bundle over an immutable series snapshot.
    pub fn compute(series: &PriceSeries) -> Self {
        let closes = series.closes();
        let (macd_line, macd_signal) = macd_series(&closes, 12, 26, 9);
        let (bb_upper, bb_lower) = bollinger_series(&closes, 20, 2.0);
        Self {
            rsi: rsi_series(&closes, 14),
            macd_line,
            macd_signal,
            atr: atr_series(series.bars(), 14),
            adx: adx_series(series.bars(), 14),
            bb_upper,
            bb_lower,
            sma20: sma_series(&closes, 20),
            sma50: sma_series(&closes, 50),
        }
    }

    pub fn latest_rsi(&self) -> Option<f64> {
        latest(&self.rsi)
    }

    pub fn latest_macd(&self) -> Option<f64> {
        latest(&self.macd_line)
    }

    pub fn latest_macd_signal(&self) -> Option<f64> {
        latest(&self.macd_signal)
    }

    pub fn latest_atr(&self) -> Option<f64> {
        latest(&self.atr)
    }

    pub fn latest_adx(&self) -> Option<f64> {
        latest(&self.adx)
    }

    pub fn latest_sma20(&self) -> Option<f64> {
        latest(&self.sma20)
    }

    pub fn latest_sma50(&self) -> Option<f64> {
        latest(&self.sma50)
    }

    /// Value `bars_back` bars before the latest, if defined.
    pub fn macd_bars_back(&self, bars_back: usize) -> Option<f64> {
        let n = self.macd_line.len();
        if n <= bars_back {
            return None;
        }
        self.macd_line[n - 1 - bars_back]
    }

    /// RSI value `bars_back` bars before the latest, if defined.
    pub fn rsi_bars_back(&self, bars_back: usize) -> Option<f64> {
        let n = self.rsi.len();
        if n <= bars_back {
            return None;
        }
        self.rsi[n - 1 - bars_back]
    }

    /// Latest values bundled for the analysis report.
    pub fn snapshot(&self, volume: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi: self.latest_rsi(),
            macd: self.latest_macd(),
            macd_signal: self.latest_macd_signal(),
            atr: self.latest_atr(),
            adx: self.latest_adx(),
            bb_upper: latest(&self.bb_upper),
            bb_lower: latest(&self.bb_lower),
            volume,
        }
    }
}

fn latest(column: &[Option<f64>]) -> Option<f64> {
    column.last().copied().flatten()
}

/// Wilder's smoothing: first value is the mean of the first `period`
/// inputs, then `(prev * (period-1) + x) / period`. Returns an empty vec
/// when there are fewer inputs than `period`.
pub(crate) fn wilders_smooth(values: &[f64], period: usize) -> Vec<f64> {
    if values.len() < period || period == 0 {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(values.len() - period + 1);
    let initial: f64 = values.iter().take(period).sum::<f64>() / period as f64;
    result.push(initial);

    for value in values.iter().skip(period) {
        let prev = *result.last().unwrap_or(&initial);
        result.push((prev * (period - 1) as f64 + value) / period as f64);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;
    use chrono::NaiveDate;

    fn series(count: usize) -> PriceSeries {
        let bars = (0..count)
            .map(|i| {
                let base = 100.0 + i as f64 * 1.5;
                Bar {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                        + chrono::Days::new(i as u64),
                    open: base,
                    high: base + 2.0,
                    low: base - 1.0,
                    close: base + 1.0,
                    volume: 1000.0,
                }
            })
            .collect();
        PriceSeries::new(bars)
    }

    #[test]
    fn test_columns_aligned_to_series() {
        let s = series(80);
        let set = IndicatorSet::compute(&s);
        assert_eq!(set.rsi.len(), 80);
        assert_eq!(set.macd_line.len(), 80);
        assert_eq!(set.macd_signal.len(), 80);
        assert_eq!(set.atr.len(), 80);
        assert_eq!(set.adx.len(), 80);
        assert_eq!(set.sma50.len(), 80);
    }

    #[test]
    fn test_warm_up_is_none_not_zero() {
        let s = series(80);
        let set = IndicatorSet::compute(&s);
        assert!(set.rsi[0].is_none());
        assert!(set.rsi[13].is_none());
        assert!(set.rsi[14].is_some());
        assert!(set.sma20[18].is_none());
        assert!(set.sma20[19].is_some());
        assert!(set.sma50[48].is_none());
        assert!(set.sma50[49].is_some());
    }

    #[test]
    fn test_short_series_all_none() {
        let s = series(5);
        let set = IndicatorSet::compute(&s);
        assert!(set.latest_rsi().is_none());
        assert!(set.latest_macd().is_none());
        assert!(set.latest_adx().is_none());
    }

    #[test]
    fn test_wilders_smooth_length() {
        let values = vec![1.0; 20];
        let smoothed = wilders_smooth(&values, 14);
        assert_eq!(smoothed.len(), 7);
        assert!((smoothed[0] - 1.0).abs() < 1e-12);
    }
}
