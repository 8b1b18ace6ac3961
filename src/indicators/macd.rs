//! MACD (Moving Average Convergence Divergence), per-bar series.

/// EMA aligned to the input: first defined entry at `period - 1` is the
/// seed SMA, then the standard recursive EMA.
fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if period == 0 || n < period {
        return out;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let seed: f64 = values.iter().take(period).sum::<f64>() / period as f64;
    out[period - 1] = Some(seed);

    let mut prev = seed;
    for i in period..n {
        prev = (values[i] - prev) * multiplier + prev;
        out[i] = Some(prev);
    }

    out
}

/// MACD line and signal line over `closes`.
///
/// Line = EMA(fast) − EMA(slow), defined from index `slow - 1`; signal is
/// the EMA of the defined line values, defined from
/// `slow + signal_period - 2`.
pub fn macd_series(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let n = closes.len();
    let mut line = vec![None; n];
    let mut signal = vec![None; n];

    let fast_ema = ema_series(closes, fast);
    let slow_ema = ema_series(closes, slow);

    for i in 0..n {
        if let (Some(f), Some(s)) = (fast_ema[i], slow_ema[i]) {
            line[i] = Some(f - s);
        }
    }

    // Signal EMA runs over the defined stretch of the line only.
    let first_defined = line.iter().position(|v| v.is_some());
    if let Some(start) = first_defined {
        let line_values: Vec<f64> = line[start..].iter().map(|v| v.unwrap_or(0.0)).collect();
        let signal_values = ema_series(&line_values, signal_period);
        for (offset, value) in signal_values.into_iter().enumerate() {
            signal[start + offset] = value;
        }
    }

    (line, signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uptrend(count: usize) -> Vec<f64> {
        (0..count).map(|i| 100.0 + i as f64 * 1.5).collect()
    }

    #[test]
    fn test_ema_seed_is_sma() {
        let ema = ema_series(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(ema[2], Some(2.0));
        assert!(ema[3].unwrap() > 2.0);
    }

    #[test]
    fn test_macd_warm_up() {
        let (line, signal) = macd_series(&uptrend(60), 12, 26, 9);
        assert!(line[24].is_none());
        assert!(line[25].is_some());
        assert!(signal[32].is_none());
        assert!(signal[33].is_some());
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let (line, _) = macd_series(&uptrend(60), 12, 26, 9);
        assert!(line.last().unwrap().unwrap() > 0.0);
    }

    #[test]
    fn test_macd_short_input() {
        let (line, signal) = macd_series(&uptrend(20), 12, 26, 9);
        assert!(line.iter().all(|v| v.is_none()));
        assert!(signal.iter().all(|v| v.is_none()));
    }
}
