//! Average True Range (ATR), per-bar series.

use crate::types::Bar;

/// True range against the previous close.
pub(crate) fn true_range(current: &Bar, previous: &Bar) -> f64 {
    let hl = current.high - current.low;
    let hc = (current.high - previous.close).abs();
    let lc = (current.low - previous.close).abs();
    hl.max(hc).max(lc)
}

/// ATR over `bars` using Wilder's smoothing. First defined at index
/// `period` (one prior close is consumed by the first true range).
pub fn atr_series(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    let n = bars.len();
    let mut out = vec![None; n];
    if period == 0 || n < period + 1 {
        return out;
    }

    let mut true_ranges = Vec::with_capacity(n - 1);
    for i in 1..n {
        true_ranges.push(true_range(&bars[i], &bars[i - 1]));
    }

    let smoothed = super::wilders_smooth(&true_ranges, period);
    for (offset, value) in smoothed.into_iter().enumerate() {
        out[period + offset] = Some(value);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bars(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64;
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
            .collect()
    }

    #[test]
    fn test_atr_warm_up() {
        let atr = atr_series(&bars(20), 14);
        assert!(atr[13].is_none());
        assert!(atr[14].is_some());
        assert!(atr[19].is_some());
    }

    #[test]
    fn test_atr_positive() {
        let atr = atr_series(&bars(30), 14);
        assert!(atr.last().unwrap().unwrap() > 0.0);
    }

    #[test]
    fn test_atr_short_input() {
        let atr = atr_series(&bars(10), 14);
        assert!(atr.iter().all(|v| v.is_none()));
    }
}
