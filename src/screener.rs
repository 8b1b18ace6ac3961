//! Screening orchestrator.
//!
//! Iterates a symbol universe, applies hard filters, runs the requested
//! pattern detectors, scores qualifiers, and returns results sorted by
//! volume ratio. Failures are caught per symbol; only filter validation
//! and universe setup surface errors to the caller.

use crate::analyzer;
use crate::config::Config;
use crate::detectors::run_detectors;
use crate::error::Result;
use crate::indicators::IndicatorSet;
use crate::scoring::composite_score;
use crate::types::{
    AnalysisReport, PriceSeries, ReferenceData, ScreenResult, ScreeningFilters, VolumeMetrics,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Market-data collaborator. Implementations own their timeouts; a
/// timeout is reported as an empty series, never an error that aborts a
/// run.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Ordered OHLCV series for one symbol; empty on no data or timeout.
    async fn fetch_series(&self, symbol: &str, lookback_months: u32) -> Result<PriceSeries>;

    /// Best-effort reference data; missing fields default to "Unknown"/0.
    async fn fetch_reference(&self, symbol: &str) -> Result<ReferenceData>;

    /// Constituent symbols for a named index.
    async fn symbol_universe(&self, index_name: &str) -> Result<Vec<String>>;
}

/// Cooperative cancellation handle, checked between symbols. Partial
/// results computed before cancellation remain valid.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The screening engine over a market-data provider.
pub struct Screener<P: MarketData> {
    provider: P,
    config: Config,
}

impl<P: MarketData> Screener<P> {
    pub fn new(provider: P, config: Config) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Screen a symbol universe against the filters. Output is sorted
    /// descending by volume ratio.
    pub async fn screen(
        &self,
        symbols: &[String],
        filters: &ScreeningFilters,
    ) -> Result<Vec<ScreenResult>> {
        self.screen_with_cancel(symbols, filters, &CancelFlag::new())
            .await
    }

    /// Like [`Screener::screen`], stopping between symbols once `cancel`
    /// fires; already-computed results are returned.
    pub async fn screen_with_cancel(
        &self,
        symbols: &[String],
        filters: &ScreeningFilters,
        cancel: &CancelFlag,
    ) -> Result<Vec<ScreenResult>> {
        filters.validate()?;

        let total = symbols.len();
        let progress_step =
            ((total as f64 * self.config.progress_interval) as usize).max(1);
        let mut results = Vec::new();
        let mut errors = 0usize;

        for (index, symbol) in symbols.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(
                    scanned = index,
                    total, "screening cancelled; returning partial results"
                );
                break;
            }

            // The per-symbol error boundary: anything thrown here is
            // counted and skipped, never aborts the run.
            match self.evaluate_symbol(symbol, filters).await {
                Ok(Some(result)) => results.push(result),
                Ok(None) => {}
                Err(e) => {
                    errors += 1;
                    warn!(symbol = %symbol, error = %e, "symbol skipped");
                }
            }

            if (index + 1) % progress_step == 0 {
                info!(
                    scanned = index + 1,
                    total,
                    qualified = results.len(),
                    "screening progress"
                );
            }
        }

        results.sort_by(|a, b| {
            b.volume_metrics
                .volume_ratio
                .total_cmp(&a.volume_metrics.volume_ratio)
        });

        info!(
            total,
            qualified = results.len(),
            errors,
            "screening run complete"
        );
        Ok(results)
    }

    async fn evaluate_symbol(
        &self,
        symbol: &str,
        filters: &ScreeningFilters,
    ) -> Result<Option<ScreenResult>> {
        let series = self
            .provider
            .fetch_series(symbol, self.config.lookback_months)
            .await?;
        if series.is_empty() {
            debug!(symbol = %symbol, "empty series, skipping");
            return Ok(None);
        }

        let latest = match series.latest() {
            Some(bar) => *bar,
            None => return Ok(None),
        };

        // Hard filters, cheapest first: price range, volume floor, caps.
        if latest.close < filters.min_price() || latest.close > filters.max_price() {
            return Ok(None);
        }
        if latest.volume < filters.min_volume() {
            return Ok(None);
        }

        // Market-cap work is skipped entirely when both cap bounds sit at
        // their non-restrictive defaults.
        let (market_cap, sector) = if filters.market_cap_unrestricted() {
            (None, "Unknown".to_string())
        } else {
            let reference = self
                .provider
                .fetch_reference(symbol)
                .await
                .unwrap_or_default();
            let cap = latest.close * reference.shares_outstanding;
            if cap < filters.min_market_cap() {
                return Ok(None);
            }
            if let Some(max_cap) = filters.max_market_cap {
                if cap > max_cap {
                    return Ok(None);
                }
            }
            (Some(cap), reference.sector)
        };

        let indicators = IndicatorSet::compute(&series);
        let patterns = run_detectors(&filters.patterns, &series, &indicators);
        // Every requested pattern must have fired.
        if !filters.patterns.is_empty() && patterns.len() != filters.patterns.len() {
            return Ok(None);
        }

        let volume_metrics = VolumeMetrics::from_volumes(&series.volumes());
        let score = composite_score(&series, &indicators, &patterns, &volume_metrics);

        Ok(Some(ScreenResult {
            symbol: symbol.to_uppercase(),
            price: latest.close,
            volume: latest.volume,
            market_cap,
            sector,
            patterns,
            volume_metrics,
            score,
        }))
    }

    /// Full single-symbol analysis: series fetch plus the analysis engine.
    pub async fn analyze(&self, symbol: &str) -> Result<AnalysisReport> {
        let series = self
            .provider
            .fetch_series(symbol, self.config.lookback_months)
            .await
            .unwrap_or_default();
        Ok(analyzer::analyze_series(symbol, &series))
    }
}
