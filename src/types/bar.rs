use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// An ordered-by-date OHLCV series for one symbol.
///
/// Bars are ascending by date with no duplicates; the series may be empty
/// and is immutable for the lifetime of a screening or analysis call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries(Vec<Bar>);

impl PriceSeries {
    /// Build a series from bars, sorting ascending and dropping
    /// duplicate dates (first occurrence wins).
    pub fn new(mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self(bars)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn latest(&self) -> Option<&Bar> {
        self.0.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.0.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.0.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.0.iter().map(|b| b.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.0.iter().map(|b| b.volume).collect()
    }

    /// Lowest low over the whole window.
    pub fn min_low(&self) -> Option<f64> {
        self.0.iter().map(|b| b.low).reduce(f64::min)
    }

    /// Highest high over the whole window.
    pub fn max_high(&self) -> Option<f64> {
        self.0.iter().map(|b| b.high).reduce(f64::max)
    }
}

impl std::ops::Index<usize> for PriceSeries {
    type Output = Bar;

    fn index(&self, index: usize) -> &Bar {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn test_series_sorts_ascending() {
        let series = PriceSeries::new(vec![bar(3, 12.0), bar(1, 10.0), bar(2, 11.0)]);
        let dates: Vec<u32> = series
            .bars()
            .iter()
            .map(|b| chrono::Datelike::day(&b.date))
            .collect();
        assert_eq!(dates, vec![1, 2, 3]);
    }

    #[test]
    fn test_series_drops_duplicate_dates() {
        let series = PriceSeries::new(vec![bar(1, 10.0), bar(1, 99.0), bar(2, 11.0)]);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_extremes() {
        let series = PriceSeries::new(vec![bar(1, 91.0), bar(2, 109.0)]);
        assert_eq!(series.min_low(), Some(90.0));
        assert_eq!(series.max_high(), Some(110.0));
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::default();
        assert!(series.is_empty());
        assert!(series.latest().is_none());
        assert!(series.min_low().is_none());
    }
}
