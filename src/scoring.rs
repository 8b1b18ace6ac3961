//! Composite scoring for screened symbols.
//!
//! Additive sub-scores with per-term caps; a term that cannot be computed
//! (warm-up not satisfied, short series) contributes 0 rather than
//! raising. The final score is clamped to `[0, MAX_SCORE]`.

use crate::detectors::pattern_weight;
use crate::indicators::IndicatorSet;
use crate::types::{PatternFlags, PriceSeries, VolumeMetrics};

/// Upper bound on the composite score.
pub const MAX_SCORE: f64 = 40.0;

/// Combine pattern hits, volume behavior, RSI/MACD state, short-term
/// momentum, moving-average alignment, and volatility into one bounded
/// score.
pub fn composite_score(
    series: &PriceSeries,
    indicators: &IndicatorSet,
    patterns: &PatternFlags,
    volume_metrics: &VolumeMetrics,
) -> f64 {
    let sum = pattern_bonus(patterns)
        + volume_term(volume_metrics.volume_ratio)
        + rsi_term(indicators.latest_rsi())
        + macd_term(indicators)
        + momentum_term(series)
        + alignment_term(series, indicators)
        + volatility_term(series, indicators);
    sum.min(MAX_SCORE)
}

fn pattern_bonus(patterns: &PatternFlags) -> f64 {
    patterns
        .iter()
        .filter_map(|name| pattern_weight(name))
        .sum()
}

fn volume_term(volume_ratio: f64) -> f64 {
    if volume_ratio > 2.0 {
        5.0
    } else if volume_ratio > 1.5 {
        3.0
    } else if volume_ratio > 1.2 {
        2.0
    } else if volume_ratio > 1.0 {
        1.0
    } else {
        0.0
    }
}

fn rsi_term(rsi: Option<f64>) -> f64 {
    match rsi {
        Some(v) if (30.0..=70.0).contains(&v) => 3.0,
        Some(v) if (25.0..=75.0).contains(&v) => 2.0,
        Some(v) if (20.0..=80.0).contains(&v) => 1.0,
        _ => 0.0,
    }
}

fn macd_term(indicators: &IndicatorSet) -> f64 {
    let mut term = 0.0;
    if let Some(macd) = indicators.latest_macd() {
        if macd > 0.0 {
            term += 2.0;
        }
        // Improving over the trailing window: latest above the value
        // three bars prior.
        if let Some(prior) = indicators.macd_bars_back(3) {
            if macd > prior {
                term += 1.0;
            }
        }
    }
    term
}

fn momentum_term(series: &PriceSeries) -> f64 {
    let closes = series.closes();
    let n = closes.len();
    if n < 6 {
        return 0.0;
    }
    let then = closes[n - 6];
    if then <= 0.0 {
        return 0.0;
    }
    let pct = (closes[n - 1] - then) / then * 100.0;
    if pct > 5.0 {
        4.0
    } else if pct > 2.0 {
        3.0
    } else if pct > 0.0 {
        2.0
    } else if pct > -2.0 {
        1.0
    } else {
        0.0
    }
}

fn alignment_term(series: &PriceSeries, indicators: &IndicatorSet) -> f64 {
    let price = match series.latest() {
        Some(bar) => bar.close,
        None => return 0.0,
    };
    let sma20 = indicators.latest_sma20();
    let sma50 = indicators.latest_sma50();
    match (sma20, sma50) {
        (Some(fast), Some(slow)) if price > fast && fast > slow => 3.0,
        (Some(fast), _) if price > fast => 2.0,
        (_, Some(slow)) if price > slow => 1.0,
        _ => 0.0,
    }
}

fn volatility_term(series: &PriceSeries, indicators: &IndicatorSet) -> f64 {
    let price = match series.latest() {
        Some(bar) if bar.close > 0.0 => bar.close,
        _ => return 0.0,
    };
    let atr = match indicators.latest_atr() {
        Some(v) => v,
        None => return 0.0,
    };
    let atr_pct = atr / price * 100.0;
    if (2.0..=6.0).contains(&atr_pct) {
        2.0
    } else if (1.0..=8.0).contains(&atr_pct) {
        1.0
    } else {
        0.0
    }
}
