use serde::{Deserialize, Serialize};

/// Round to two decimal places, matching quoted price precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fibonacci retracement levels over a high/low window.
///
/// Each level is `high − (high − low) × ratio`, rounded to cents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibLevels {
    pub level_236: f64,
    pub level_382: f64,
    pub level_500: f64,
    pub level_618: f64,
    pub level_786: f64,
}

impl FibLevels {
    pub fn from_range(low: f64, high: f64) -> Self {
        let diff = high - low;
        Self {
            level_236: round2(high - diff * 0.236),
            level_382: round2(high - diff * 0.382),
            level_500: round2(high - diff * 0.5),
            level_618: round2(high - diff * 0.618),
            level_786: round2(high - diff * 0.786),
        }
    }

    /// Levels as (label, price) pairs, highest ratio last.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("23%", self.level_236),
            ("38%", self.level_382),
            ("50%", self.level_500),
            ("61%", self.level_618),
            ("78%", self.level_786),
        ]
    }
}

/// One profit target with its position fraction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target {
    pub price: f64,
    pub pct: u8,
}

/// Trailing-stop activation rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailStop {
    pub trigger: f64,
    pub distance: f64,
}

/// Deterministic trade plan derived from Fibonacci levels and latest close.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePlan {
    /// Entry band, [61.8% level, 50% level].
    pub entry: [f64; 2],
    pub stop_loss: f64,
    pub targets: Vec<Target>,
    pub trail_after: TrailStop,
}

/// Latest indicator values for the analysis snapshot. `None` means the
/// indicator's warm-up window was not satisfied.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_signal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_lower: Option<f64>,
    pub volume: f64,
}

/// Conviction buckets for the analysis composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Conviction {
    High,
    Moderate,
    Low,
}

impl Conviction {
    pub fn from_score(score: f64) -> Self {
        if score >= 10.0 {
            Conviction::High
        } else if score >= 5.0 {
            Conviction::Moderate
        } else {
            Conviction::Low
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Conviction::High => {
                "Strong technical setup with multiple confirming indicators. Good risk/reward opportunity."
            }
            Conviction::Moderate => {
                "Mixed signals present. Proceed with caution and tight risk management."
            }
            Conviction::Low => {
                "Poor technical alignment. Consider waiting for better setup or alternative opportunities."
            }
        }
    }
}

/// Key support/resistance levels for the summary block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyLevels {
    pub support: f64,
    pub resistance: f64,
    pub current_trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Bullish,
    Bearish,
}

/// Human-readable interpretation strings, deterministic per numeric band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInsights {
    pub rsi_analysis: String,
    pub macd_analysis: String,
    pub adx_analysis: String,
    pub bollinger_analysis: String,
    pub fibonacci_analysis: String,
    pub volume_analysis: String,
    pub risk_factors: Vec<String>,
}

/// Trading summary for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub conviction: Conviction,
    pub recommendation: String,
    pub key_levels: KeyLevels,
}

/// Full analysis output for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub symbol: String,
    /// False when no series was available; all other fields hold neutral
    /// defaults in that case.
    pub has_data: bool,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fib_levels: Option<FibLevels>,
    pub indicators: IndicatorSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<TradePlan>,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<AnalysisInsights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<AnalysisSummary>,
}

impl AnalysisReport {
    /// Explicit no-data result for a symbol with an empty series.
    pub fn no_data(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            has_data: false,
            price: 0.0,
            fib_levels: None,
            indicators: IndicatorSnapshot::default(),
            plan: None,
            score: 0.0,
            insights: None,
            summary: None,
        }
    }
}
