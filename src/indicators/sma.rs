//! Simple moving average, per-bar series.

/// Rolling mean of `values` over `period`. The first defined entry sits
/// at index `period - 1`.
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if period == 0 || n < period {
        return out;
    }

    let mut window_sum: f64 = values.iter().take(period).sum();
    out[period - 1] = Some(window_sum / period as f64);
    for i in period..n {
        window_sum += values[i] - values[i - period];
        out[i] = Some(window_sum / period as f64);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_values() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = sma_series(&values, 3);
        assert_eq!(sma, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_sma_short_input() {
        let sma = sma_series(&[1.0, 2.0], 3);
        assert!(sma.iter().all(|v| v.is_none()));
    }
}
