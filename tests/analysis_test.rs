//! Analysis engine integration tests.
//!
//! Exercises the full per-symbol report: Fibonacci levels, trade plan,
//! conviction, interpretation strings, and the no-data path.

use chrono::NaiveDate;
use dowser::analyzer::analyze_series;
use dowser::{round2, Bar, Conviction, PriceSeries, Trend};

/// A 40-bar series whose window low is 90 and window high is 110.
fn band_series() -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = (0..40)
        .map(|i| {
            let close = 100.0 + (i % 5) as f64;
            Bar {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: if i == 20 { 110.0 } else { close + 0.5 },
                low: if i == 10 { 90.0 } else { close - 0.5 },
                close,
                volume: 25_000.0,
            }
        })
        .collect();
    PriceSeries::new(bars)
}

#[test]
fn test_fib_levels_from_window_extremes() {
    let report = analyze_series("acme", &band_series());
    assert!(report.has_data);
    assert_eq!(report.symbol, "ACME");

    let fibs = report.fib_levels.unwrap();
    assert_eq!(fibs.level_236, round2(110.0 - 20.0 * 0.236));
    assert_eq!(fibs.level_382, round2(110.0 - 20.0 * 0.382));
    assert_eq!(fibs.level_500, 100.0);
    assert_eq!(fibs.level_618, round2(110.0 - 20.0 * 0.618));
    assert_eq!(fibs.level_786, round2(110.0 - 20.0 * 0.786));
}

#[test]
fn test_trade_plan_derived_from_levels() {
    let report = analyze_series("acme", &band_series());
    let fibs = report.fib_levels.unwrap();
    let plan = report.plan.unwrap();

    assert_eq!(plan.entry, [fibs.level_618, fibs.level_500]);
    assert_eq!(plan.stop_loss, round2(fibs.level_618 * 0.95));

    assert_eq!(plan.targets.len(), 3);
    assert_eq!(plan.targets[0].price, fibs.level_382);
    assert_eq!(plan.targets[1].price, fibs.level_236);
    assert_eq!(plan.targets[2].price, 110.0);
    let allocated: u32 = plan.targets.iter().map(|t| t.pct as u32).sum();
    assert_eq!(allocated, 100);

    assert_eq!(plan.trail_after.trigger, fibs.level_236);
    assert_eq!(plan.trail_after.distance, round2(0.1 * report.price));
}

#[test]
fn test_summary_levels_and_trend() {
    let report = analyze_series("acme", &band_series());
    let fibs = report.fib_levels.unwrap();
    let summary = report.summary.unwrap();

    assert_eq!(summary.key_levels.support, fibs.level_618);
    assert_eq!(summary.key_levels.resistance, fibs.level_382);
    assert_eq!(summary.conviction, Conviction::from_score(report.score));
    let expected_trend = if report.indicators.macd.unwrap_or(0.0) > 0.0 {
        Trend::Bullish
    } else {
        Trend::Bearish
    };
    assert_eq!(summary.key_levels.current_trend, expected_trend);
}

#[test]
fn test_insights_present_with_sufficient_history() {
    let report = analyze_series("acme", &band_series());
    let insights = report.insights.unwrap();

    // 40 bars satisfies every indicator warm-up, so each interpretation
    // carries a formatted value rather than the unavailable fallback.
    assert!(insights.rsi_analysis.starts_with("RSI "));
    assert!(insights.macd_analysis.starts_with("MACD "));
    assert!(insights.adx_analysis.starts_with("ADX "));
    assert!(insights.bollinger_analysis.contains('%'));
    assert!(insights.fibonacci_analysis.contains("Fibonacci"));
    assert!(insights.volume_analysis.contains("shares"));
    // General risk notes are always present, symbol-specific first.
    assert!(insights.risk_factors.len() >= 3);
    assert!(insights
        .risk_factors
        .iter()
        .any(|r| r.contains("ACME")));
}

#[test]
fn test_short_history_degrades_to_unavailable() {
    let short = PriceSeries::new(band_series().bars()[..5].to_vec());
    let report = analyze_series("acme", &short);
    assert!(report.has_data);

    let insights = report.insights.unwrap();
    assert_eq!(insights.rsi_analysis, "RSI data unavailable");
    assert_eq!(insights.macd_analysis, "MACD data unavailable");
    assert_eq!(insights.adx_analysis, "ADX data unavailable");
    assert_eq!(
        insights.bollinger_analysis,
        "Bollinger Bands data unavailable"
    );
    assert!(report.indicators.rsi.is_none());
}

#[test]
fn test_empty_series_yields_no_data_report() {
    let report = analyze_series("ghost", &PriceSeries::default());
    assert!(!report.has_data);
    assert_eq!(report.symbol, "GHOST");
    assert_eq!(report.price, 0.0);
    assert!(report.fib_levels.is_none());
    assert!(report.plan.is_none());
    assert!(report.insights.is_none());
    assert!(report.summary.is_none());
}

#[test]
fn test_report_serializes_camel_case() {
    let report = analyze_series("acme", &band_series());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["hasData"], true);
    assert!(json["fibLevels"]["level500"].is_number());
    assert!(json["summary"]["keyLevels"]["currentTrend"].is_string());
}
