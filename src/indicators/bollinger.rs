//! Bollinger Bands, per-bar series.

/// Upper and lower bands: rolling SMA ± `multiplier` standard deviations
/// over `period` closes. First defined at index `period - 1`.
pub fn bollinger_series(
    closes: &[f64],
    period: usize,
    multiplier: f64,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let n = closes.len();
    let mut upper = vec![None; n];
    let mut lower = vec![None; n];
    if period == 0 || n < period {
        return (upper, lower);
    }

    for i in (period - 1)..n {
        let window = &closes[i + 1 - period..=i];
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance =
            window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
        let std_dev = variance.sqrt();
        upper[i] = Some(mean + multiplier * std_dev);
        lower[i] = Some(mean - multiplier * std_dev);
    }

    (upper, lower)
}
