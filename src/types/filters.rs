use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default minimum share price.
pub const DEFAULT_MIN_PRICE: f64 = 1.0;
/// Default maximum share price.
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;
/// Default minimum daily volume.
pub const DEFAULT_MIN_VOLUME: f64 = 10_000.0;
/// Default minimum market cap.
pub const DEFAULT_MIN_MARKET_CAP: f64 = 10_000_000.0;

/// Screening filter parameters.
///
/// All bounds are optional; omitted fields take the documented defaults.
/// An absent `max_market_cap` means unbounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_market_cap: Option<f64>,
    /// Pattern names that must ALL fire for a symbol to qualify.
    #[serde(default)]
    pub patterns: BTreeSet<String>,
}

impl ScreeningFilters {
    pub fn min_price(&self) -> f64 {
        self.min_price.unwrap_or(DEFAULT_MIN_PRICE)
    }

    pub fn max_price(&self) -> f64 {
        self.max_price.unwrap_or(DEFAULT_MAX_PRICE)
    }

    pub fn min_volume(&self) -> f64 {
        self.min_volume.unwrap_or(DEFAULT_MIN_VOLUME)
    }

    pub fn min_market_cap(&self) -> f64 {
        self.min_market_cap.unwrap_or(DEFAULT_MIN_MARKET_CAP)
    }

    /// Whether both cap bounds sit at their non-restrictive defaults, in
    /// which case the orchestrator skips market-cap work entirely.
    pub fn market_cap_unrestricted(&self) -> bool {
        self.min_market_cap() == DEFAULT_MIN_MARKET_CAP && self.max_market_cap.is_none()
    }

    /// Reject malformed filters before any screening work starts.
    pub fn validate(&self) -> Result<()> {
        if self.min_price() < 0.0 || self.min_volume() < 0.0 || self.min_market_cap() < 0.0 {
            return Err(EngineError::InvalidFilter(
                "bounds must be non-negative".into(),
            ));
        }
        if self.min_price() > self.max_price() {
            return Err(EngineError::InvalidFilter(format!(
                "min_price {} exceeds max_price {}",
                self.min_price(),
                self.max_price()
            )));
        }
        if let Some(max_cap) = self.max_market_cap {
            if self.min_market_cap() > max_cap {
                return Err(EngineError::InvalidFilter(format!(
                    "min_market_cap {} exceeds max_market_cap {}",
                    self.min_market_cap(),
                    max_cap
                )));
            }
        }
        Ok(())
    }
}
