//! Average Directional Index (ADX), per-bar series.

use super::{atr::true_range, wilders_smooth};
use crate::types::Bar;

/// ADX over `bars`. Directional movement and true range are smoothed with
/// Wilder's method, DX is derived from +DI/−DI, and ADX is the smoothed
/// DX. First defined at index `2 * period - 1`.
pub fn adx_series(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    let n = bars.len();
    let mut out = vec![None; n];
    if period == 0 || n < 2 * period {
        return out;
    }

    let mut plus_dm = Vec::with_capacity(n - 1);
    let mut minus_dm = Vec::with_capacity(n - 1);
    let mut tr = Vec::with_capacity(n - 1);

    for i in 1..n {
        let current = &bars[i];
        let previous = &bars[i - 1];

        let up_move = current.high - previous.high;
        let down_move = previous.low - current.low;

        plus_dm.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
        tr.push(true_range(current, previous));
    }

    let smoothed_plus = wilders_smooth(&plus_dm, period);
    let smoothed_minus = wilders_smooth(&minus_dm, period);
    let smoothed_tr = wilders_smooth(&tr, period);
    if smoothed_tr.is_empty() {
        return out;
    }

    let mut dx_values = Vec::with_capacity(smoothed_tr.len());
    for i in 0..smoothed_tr.len() {
        let atr = smoothed_tr[i];
        if atr == 0.0 {
            dx_values.push(0.0);
            continue;
        }

        let plus_di = (smoothed_plus[i] / atr) * 100.0;
        let minus_di = (smoothed_minus[i] / atr) * 100.0;
        let di_sum = plus_di + minus_di;
        dx_values.push(if di_sum > 0.0 {
            ((plus_di - minus_di).abs() / di_sum) * 100.0
        } else {
            0.0
        });
    }

    // dx_values[k] is aligned to bar index period + k; smoothing consumes
    // another period - 1 entries.
    let adx_values = wilders_smooth(&dx_values, period);
    for (offset, value) in adx_values.into_iter().enumerate() {
        out[2 * period - 1 + offset] = Some(value);
    }

    out
}
