//! Per-symbol analysis engine.
//!
//! Turns one symbol's series into Fibonacci levels, a trade plan, a
//! conviction score, and deterministic interpretation strings keyed on
//! numeric bands. Unavailable indicator inputs produce explicit "data
//! unavailable" text, never a formatted number.

use crate::indicators::IndicatorSet;
use crate::types::{
    round2, AnalysisInsights, AnalysisReport, AnalysisSummary, Conviction, FibLevels,
    IndicatorSnapshot, KeyLevels, PriceSeries, TradePlan, TrailStop, Target, Trend,
    VolumeMetrics,
};
use tracing::debug;

/// Analyze one symbol's series. An empty series yields the explicit
/// no-data report.
pub fn analyze_series(symbol: &str, series: &PriceSeries) -> AnalysisReport {
    let (latest, low, high) = match (series.latest(), series.min_low(), series.max_high()) {
        (Some(bar), Some(low), Some(high)) => (*bar, low, high),
        _ => {
            debug!(symbol = %symbol, "no data for analysis");
            return AnalysisReport::no_data(symbol);
        }
    };

    let fibs = FibLevels::from_range(low, high);
    let indicators = IndicatorSet::compute(series);
    let snapshot = indicators.snapshot(latest.volume);
    let volume_metrics = VolumeMetrics::from_volumes(&series.volumes());

    let score = conviction_score(&snapshot, volume_metrics.volume_ratio);
    let conviction = Conviction::from_score(score);
    let plan = trade_plan(&fibs, high, latest.close);

    let insights = AnalysisInsights {
        rsi_analysis: interpret_rsi(snapshot.rsi),
        macd_analysis: interpret_macd(snapshot.macd),
        adx_analysis: interpret_adx(snapshot.adx),
        bollinger_analysis: interpret_bollinger(latest.close, snapshot.bb_upper, snapshot.bb_lower),
        fibonacci_analysis: fibonacci_context(&fibs, latest.close),
        volume_analysis: volume_commentary(&volume_metrics),
        risk_factors: risk_factors(&snapshot, score, symbol),
    };

    let summary = AnalysisSummary {
        conviction,
        recommendation: conviction.recommendation().to_string(),
        key_levels: KeyLevels {
            support: fibs.level_618,
            resistance: fibs.level_382,
            current_trend: if snapshot.macd.unwrap_or(0.0) > 0.0 {
                Trend::Bullish
            } else {
                Trend::Bearish
            },
        },
    };

    AnalysisReport {
        symbol: symbol.to_uppercase(),
        has_data: true,
        price: round2(latest.close),
        fib_levels: Some(fibs),
        indicators: snapshot,
        plan: Some(plan),
        score,
        insights: Some(insights),
        summary: Some(summary),
    }
}

/// Conviction composite, distinct from the screening score: RSI
/// centering, raw MACD, volume ratio, and ADX strength. Unavailable
/// terms contribute 0.
pub fn conviction_score(snapshot: &IndicatorSnapshot, volume_ratio: f64) -> f64 {
    let rsi_score = snapshot.rsi.map_or(0.0, |rsi| (50.0 - (rsi - 50.0).abs()) * 0.3);
    let macd_score = snapshot.macd.map_or(0.0, |macd| macd * 0.3);
    let vol_score = volume_ratio * 0.2;
    let adx_score = snapshot.adx.map_or(0.0, |adx| (adx / 100.0) * 0.2);
    rsi_score + macd_score + vol_score + adx_score
}

/// Entry band, stop, scaled targets, and trailing stop from the
/// Fibonacci levels and latest close.
pub fn trade_plan(fibs: &FibLevels, window_high: f64, latest_close: f64) -> TradePlan {
    TradePlan {
        entry: [fibs.level_618, fibs.level_500],
        stop_loss: round2(fibs.level_618 * 0.95),
        targets: vec![
            Target {
                price: fibs.level_382,
                pct: 30,
            },
            Target {
                price: fibs.level_236,
                pct: 40,
            },
            Target {
                price: round2(window_high),
                pct: 30,
            },
        ],
        trail_after: TrailStop {
            trigger: fibs.level_236,
            distance: round2(0.1 * latest_close),
        },
    }
}

pub fn interpret_rsi(rsi: Option<f64>) -> String {
    let rsi = match rsi {
        Some(v) => v,
        None => return "RSI data unavailable".to_string(),
    };
    if rsi >= 70.0 {
        format!("RSI {rsi:.1} - OVERBOUGHT: Strong selling pressure expected. Consider taking profits or waiting for pullback.")
    } else if rsi >= 60.0 {
        format!("RSI {rsi:.1} - BULLISH: Strong upward momentum but approaching overbought territory. Monitor for reversal signals.")
    } else if rsi >= 40.0 {
        format!("RSI {rsi:.1} - NEUTRAL: Balanced momentum. Wait for clearer directional signals before entry.")
    } else if rsi >= 30.0 {
        format!("RSI {rsi:.1} - BEARISH: Downward momentum present. Look for support levels before considering entry.")
    } else {
        format!("RSI {rsi:.1} - OVERSOLD: Potential buying opportunity as selling pressure may be exhausted. Look for reversal confirmation.")
    }
}

pub fn interpret_macd(macd: Option<f64>) -> String {
    let macd = match macd {
        Some(v) => v,
        None => return "MACD data unavailable".to_string(),
    };
    let strength = if macd.abs() > 1.0 { "Strong" } else { "Moderate" };
    if macd > 0.0 {
        format!("MACD {macd:.3} - BULLISH: Positive value suggests upward momentum. {strength} buy signal when above signal line.")
    } else if macd < 0.0 {
        format!("MACD {macd:.3} - BEARISH: Negative value suggests downward momentum. {strength} sell signal when below signal line.")
    } else {
        format!("MACD {macd:.3} - NEUTRAL: Momentum at equilibrium. Watch for directional breakout.")
    }
}

pub fn interpret_adx(adx: Option<f64>) -> String {
    let adx = match adx {
        Some(v) => v,
        None => return "ADX data unavailable".to_string(),
    };
    if adx >= 50.0 {
        format!("ADX {adx:.1} - VERY STRONG TREND: Extremely strong trending market. High probability trend continuation.")
    } else if adx >= 25.0 {
        format!("ADX {adx:.1} - STRONG TREND: Clear trending market. Good for trend-following strategies.")
    } else if adx >= 20.0 {
        format!("ADX {adx:.1} - EMERGING TREND: Trend is developing. Monitor for strength confirmation.")
    } else {
        format!("ADX {adx:.1} - WEAK/NO TREND: Choppy, sideways market. Avoid trend-following strategies.")
    }
}

pub fn interpret_bollinger(price: f64, upper: Option<f64>, lower: Option<f64>) -> String {
    let (upper, lower) = match (upper, lower) {
        (Some(u), Some(l)) => (u, l),
        _ => return "Bollinger Bands data unavailable".to_string(),
    };

    let width = upper - lower;
    // A zero-width band reads as mid-band rather than dividing by zero.
    let position = if width > 0.0 {
        (price - lower) / width * 100.0
    } else {
        50.0
    };

    if position >= 80.0 {
        format!("Price near upper band ({position:.0}%) - OVERBOUGHT: High probability of pullback to middle band.")
    } else if position >= 60.0 {
        format!("Price in upper zone ({position:.0}%) - BULLISH: Strong upward momentum, but watch for resistance.")
    } else if position >= 40.0 {
        format!("Price near middle band ({position:.0}%) - NEUTRAL: Balanced between support and resistance.")
    } else if position >= 20.0 {
        format!("Price in lower zone ({position:.0}%) - BEARISH: Downward pressure, but potential support nearby.")
    } else {
        format!("Price near lower band ({position:.0}%) - OVERSOLD: High probability of bounce to middle band.")
    }
}

/// Nearest-level Fibonacci context: "near" means within 5% of the full
/// retracement span.
pub fn fibonacci_context(fibs: &FibLevels, price: f64) -> String {
    let entries = fibs.entries();
    let span = fibs.level_236 - fibs.level_786;
    let tolerance = span.abs() * 0.05;

    for (label, level) in entries {
        if (price - level).abs() < tolerance {
            return format!(
                "Current price near {label} Fibonacci level (${level:.2}) - This often acts as significant support or resistance."
            );
        }
    }

    let above = entries
        .iter()
        .filter(|(_, level)| *level > price)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    let below = entries
        .iter()
        .filter(|(_, level)| *level < price)
        .max_by(|a, b| a.1.total_cmp(&b.1));

    if let (Some((above_label, above_level)), Some((below_label, below_level))) = (above, below) {
        return format!(
            "Price between {below_label} (${below_level:.2}) and {above_label} (${above_level:.2}) Fibonacci levels."
        );
    }

    "Price outside primary Fibonacci retracement zones.".to_string()
}

fn volume_commentary(metrics: &VolumeMetrics) -> String {
    if metrics.avg_volume_20 > 0.0 {
        format!(
            "Current volume: {:.0} shares. Average 20-day volume: {:.0} shares.",
            metrics.current_volume, metrics.avg_volume_20
        )
    } else {
        "Volume data insufficient for analysis.".to_string()
    }
}

fn risk_factors(snapshot: &IndicatorSnapshot, score: f64, symbol: &str) -> Vec<String> {
    let mut risks = Vec::new();

    if let Some(atr) = snapshot.atr {
        if atr > 5.0 {
            risks.push(format!(
                "HIGH VOLATILITY: ATR of {atr:.2} indicates significant price swings. Use smaller position sizes."
            ));
        }
    }

    if let Some(rsi) = snapshot.rsi {
        if !(25.0..=75.0).contains(&rsi) {
            risks.push(
                "MOMENTUM EXTREME: RSI at extreme levels increases reversal probability. Consider profit-taking or wait for better entry.".to_string(),
            );
        }
    }

    if let Some(adx) = snapshot.adx {
        if adx < 20.0 {
            risks.push(
                "WEAK TREND: Low ADX suggests choppy, directionless market. Trend-following strategies may fail.".to_string(),
            );
        }
    }

    if score < 5.0 {
        risks.push(
            "LOW CONVICTION SETUP: Poor technical alignment. Consider waiting for better opportunity.".to_string(),
        );
    }

    let symbol = symbol.to_uppercase();
    risks.push(format!(
        "NEWS SENSITIVITY: {symbol} may react strongly to earnings, FDA approvals, or industry developments. Monitor news flow."
    ));
    risks.push(
        "MARKET CONDITIONS: Broader market trends and sector rotation can override individual stock technicals.".to_string(),
    );
    risks.push(
        "LIQUIDITY RISK: Ensure adequate volume for planned position size to avoid slippage on entry/exit.".to_string(),
    );

    risks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bar, PriceSeries};
    use chrono::NaiveDate;

    fn range_series(low: f64, high: f64, count: usize) -> PriceSeries {
        let bars = (0..count)
            .map(|i| {
                let close = (low + high) / 2.0;
                Bar {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                        + chrono::Days::new(i as u64),
                    open: close,
                    high: if i == count / 2 { high } else { close },
                    low: if i == count / 4 { low } else { close },
                    close,
                    volume: 10_000.0,
                }
            })
            .collect();
        PriceSeries::new(bars)
    }

    #[test]
    fn test_fifty_percent_level_exact() {
        let series = range_series(90.0, 110.0, 30);
        let report = analyze_series("test", &series);
        let fibs = report.fib_levels.unwrap();
        assert_eq!(fibs.level_500, 100.0);
        let plan = report.plan.unwrap();
        assert_eq!(plan.entry, [round2(110.0 - 20.0 * 0.618), 100.0]);
    }

    #[test]
    fn test_trade_plan_shape() {
        let series = range_series(90.0, 110.0, 30);
        let report = analyze_series("test", &series);
        let plan = report.plan.unwrap();
        assert_eq!(plan.stop_loss, round2(plan.entry[0] * 0.95));
        assert_eq!(plan.targets.len(), 3);
        assert_eq!(plan.targets.iter().map(|t| t.pct as u32).sum::<u32>(), 100);
        assert_eq!(plan.targets[2].price, 110.0);
        assert_eq!(plan.trail_after.trigger, plan.targets[1].price);
    }

    #[test]
    fn test_empty_series_no_data() {
        let report = analyze_series("aapl", &PriceSeries::default());
        assert!(!report.has_data);
        assert_eq!(report.symbol, "AAPL");
        assert!(report.fib_levels.is_none());
        assert!(report.plan.is_none());
    }

    #[test]
    fn test_interpret_rsi_unavailable() {
        assert_eq!(interpret_rsi(None), "RSI data unavailable");
    }

    #[test]
    fn test_interpret_rsi_bands() {
        assert!(interpret_rsi(Some(72.0)).contains("OVERBOUGHT"));
        assert!(interpret_rsi(Some(65.0)).contains("BULLISH"));
        assert!(interpret_rsi(Some(50.0)).contains("NEUTRAL"));
        assert!(interpret_rsi(Some(35.0)).contains("BEARISH"));
        assert!(interpret_rsi(Some(20.0)).contains("OVERSOLD"));
    }

    #[test]
    fn test_interpret_macd_strength() {
        assert!(interpret_macd(Some(1.5)).contains("Strong buy"));
        assert!(interpret_macd(Some(0.2)).contains("Moderate buy"));
        assert!(interpret_macd(Some(-0.2)).contains("Moderate sell"));
        assert_eq!(interpret_macd(None), "MACD data unavailable");
    }

    #[test]
    fn test_interpret_bollinger_zero_width() {
        let text = interpret_bollinger(100.0, Some(100.0), Some(100.0));
        assert!(text.contains("NEUTRAL"));
    }

    #[test]
    fn test_conviction_terms_default_to_zero() {
        let snapshot = IndicatorSnapshot::default();
        assert_eq!(conviction_score(&snapshot, 0.0), 0.0);
    }

    #[test]
    fn test_conviction_high() {
        let snapshot = IndicatorSnapshot {
            rsi: Some(50.0),
            macd: Some(1.0),
            adx: Some(30.0),
            ..Default::default()
        };
        // 15.0 + 0.3 + 0.2 + 0.06
        let score = conviction_score(&snapshot, 1.0);
        assert!(score >= 10.0);
        assert_eq!(Conviction::from_score(score), Conviction::High);
    }

    #[test]
    fn test_short_series_interpretations_unavailable() {
        let series = range_series(90.0, 110.0, 5);
        let report = analyze_series("test", &series);
        let insights = report.insights.unwrap();
        assert_eq!(insights.rsi_analysis, "RSI data unavailable");
        assert_eq!(insights.macd_analysis, "MACD data unavailable");
        assert_eq!(insights.adx_analysis, "ADX data unavailable");
    }
}
