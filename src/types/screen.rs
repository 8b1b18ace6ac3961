use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Pattern names that fired for a symbol, order-independent and deduplicated.
pub type PatternFlags = BTreeSet<String>;

/// Volume behavior relative to the recent average.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMetrics {
    /// Latest bar volume.
    pub current_volume: f64,
    /// Trailing 20-bar average volume (or of the bars available).
    pub avg_volume_20: f64,
    /// current / average; 0.0 when the average is zero.
    pub volume_ratio: f64,
}

impl VolumeMetrics {
    /// Compute from a volume column. Zero average yields a zero ratio
    /// rather than a division error.
    pub fn from_volumes(volumes: &[f64]) -> Self {
        let current_volume = volumes.last().copied().unwrap_or(0.0);
        let window = volumes.iter().rev().take(20).copied().collect::<Vec<_>>();
        let avg_volume_20 = if window.is_empty() {
            0.0
        } else {
            window.iter().sum::<f64>() / window.len() as f64
        };
        let volume_ratio = if avg_volume_20 > 0.0 {
            current_volume / avg_volume_20
        } else {
            0.0
        };
        Self {
            current_volume,
            avg_volume_20,
            volume_ratio,
        }
    }
}

/// One qualifying symbol from a screening run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenResult {
    pub symbol: String,
    pub price: f64,
    pub volume: f64,
    /// Absent when market-cap evaluation was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    pub sector: String,
    pub patterns: PatternFlags,
    pub volume_metrics: VolumeMetrics,
    pub score: f64,
}

/// Best-effort reference data for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub sector: String,
    pub shares_outstanding: f64,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            sector: "Unknown".to_string(),
            shares_outstanding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_metrics_zero_average() {
        let metrics = VolumeMetrics::from_volumes(&[0.0, 0.0, 0.0]);
        assert_eq!(metrics.volume_ratio, 0.0);
    }

    #[test]
    fn test_volume_metrics_ratio() {
        let mut volumes = vec![1000.0; 19];
        volumes.push(2000.0);
        let metrics = VolumeMetrics::from_volumes(&volumes);
        assert_eq!(metrics.current_volume, 2000.0);
        assert!((metrics.avg_volume_20 - 1050.0).abs() < 1e-9);
        assert!(metrics.volume_ratio > 1.9 && metrics.volume_ratio < 2.0);
    }

    #[test]
    fn test_volume_metrics_empty() {
        let metrics = VolumeMetrics::from_volumes(&[]);
        assert_eq!(metrics.current_volume, 0.0);
        assert_eq!(metrics.volume_ratio, 0.0);
    }
}
