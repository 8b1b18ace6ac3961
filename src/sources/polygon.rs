//! Polygon.io API client for daily aggregates, index constituents, and
//! company reference data.
//!
//! Aggregate requests that time out or fail at the transport layer come
//! back as an empty series so one slow symbol never aborts a screening
//! run. Universe lookups are cached with a TTL since index membership
//! changes rarely.

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::screener::MarketData;
use crate::types::{Bar, PriceSeries, ReferenceData};
use async_trait::async_trait;
use chrono::{DateTime, Days, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const POLYGON_URL: &str = "https://api.polygon.io";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Aggregates (bars) response.
#[derive(Debug, Clone, Deserialize)]
pub struct AggsResponse {
    pub results: Option<Vec<AggBar>>,
}

/// One daily aggregate bar.
#[derive(Debug, Clone, Deserialize)]
pub struct AggBar {
    /// Window start, Unix milliseconds.
    pub t: i64,
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
    pub v: f64,
}

impl AggBar {
    fn to_bar(&self) -> Option<Bar> {
        let date = DateTime::<Utc>::from_timestamp_millis(self.t)?.date_naive();
        Some(Bar {
            date,
            open: self.o,
            high: self.h,
            low: self.l,
            close: self.c,
            volume: self.v,
        })
    }
}

/// Index constituents response page.
#[derive(Debug, Clone, Deserialize)]
pub struct ConstituentsResponse {
    pub results: Option<Vec<Constituent>>,
    pub next_url: Option<String>,
}

/// One index constituent.
#[derive(Debug, Clone, Deserialize)]
pub struct Constituent {
    pub ticker: String,
}

/// Company reference response; every field is best-effort.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyResponse {
    pub sector: Option<String>,
    #[serde(alias = "shares_outstanding")]
    pub shares: Option<f64>,
}

/// Polygon.io API client.
pub struct PolygonClient {
    client: Client,
    api_key: String,
    universes: TtlCache<Vec<String>>,
}

impl PolygonClient {
    /// Create a client from the engine configuration. A missing API key
    /// is not an error here; requests will fail upstream instead.
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: config.polygon_api_key.clone().unwrap_or_default(),
            universes: TtlCache::new(
                Duration::from_secs(config.universe_ttl_secs),
                config.universe_cache_capacity,
            ),
        }
    }

    /// Map a friendly index name to Polygon's index symbol.
    pub fn index_symbol(index_name: &str) -> Option<&'static str> {
        match index_name.to_lowercase().as_str() {
            "nasdaq" => Some("NDX"),
            "sp500" => Some("SPX"),
            "dow" => Some("DJI"),
            _ => None,
        }
    }

    async fn fetch_constituents(&self, index_symbol: &str) -> Result<Vec<String>> {
        let mut url = format!(
            "{POLYGON_URL}/v3/reference/index_constituents?symbol={index_symbol}&apiKey={}",
            self.api_key
        );
        let mut tickers = Vec::new();

        loop {
            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                return Err(EngineError::Upstream(format!(
                    "constituents request returned {}",
                    response.status()
                )));
            }
            let page: ConstituentsResponse = response.json().await?;
            if let Some(results) = page.results {
                tickers.extend(results.into_iter().map(|c| c.ticker));
            }
            match page.next_url {
                Some(next) => url = format!("{next}&apiKey={}", self.api_key),
                None => break,
            }
        }

        Ok(tickers)
    }
}

#[async_trait]
impl MarketData for PolygonClient {
    async fn fetch_series(&self, symbol: &str, lookback_months: u32) -> Result<PriceSeries> {
        let to_date = Utc::now().date_naive();
        let from_date = to_date - Days::new(30 * lookback_months as u64);
        let url = format!(
            "{POLYGON_URL}/v2/aggs/ticker/{symbol}/range/1/day/{from_date}/{to_date}\
             ?adjusted=true&sort=asc&limit=5000&apiKey={}",
            self.api_key
        );

        // Transport failures (timeouts included) degrade to an empty
        // series rather than an error.
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "aggregates request failed");
                return Ok(PriceSeries::default());
            }
        };
        if !response.status().is_success() {
            return Err(EngineError::Upstream(format!(
                "aggregates request returned {}",
                response.status()
            )));
        }

        let data: AggsResponse = response.json().await?;
        let bars = data
            .results
            .unwrap_or_default()
            .iter()
            .filter_map(AggBar::to_bar)
            .collect();
        Ok(PriceSeries::new(bars))
    }

    async fn fetch_reference(&self, symbol: &str) -> Result<ReferenceData> {
        let url = format!(
            "{POLYGON_URL}/v1/meta/symbols/{symbol}/company?apiKey={}",
            self.api_key
        );

        // Reference data is best-effort; any failure falls back to the
        // defaults instead of failing the symbol.
        let company: CompanyResponse = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                response.json().await.unwrap_or_default()
            }
            Ok(response) => {
                debug!(symbol = %symbol, status = %response.status(), "company request rejected");
                CompanyResponse::default()
            }
            Err(e) => {
                debug!(symbol = %symbol, error = %e, "company request failed");
                CompanyResponse::default()
            }
        };

        Ok(ReferenceData {
            sector: company.sector.unwrap_or_else(|| "Unknown".to_string()),
            shares_outstanding: company.shares.unwrap_or(0.0),
        })
    }

    async fn symbol_universe(&self, index_name: &str) -> Result<Vec<String>> {
        let index_symbol = Self::index_symbol(index_name)
            .ok_or_else(|| EngineError::UnknownIndex(index_name.to_string()))?;

        let cache_key = index_symbol.to_string();
        if let Some(tickers) = self.universes.get(&cache_key) {
            debug!(index = %index_name, count = tickers.len(), "universe cache hit");
            return Ok(tickers);
        }

        let tickers = self.fetch_constituents(index_symbol).await?;
        self.universes.set(cache_key, tickers.clone());
        Ok(tickers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_index_symbol_mapping() {
        assert_eq!(PolygonClient::index_symbol("nasdaq"), Some("NDX"));
        assert_eq!(PolygonClient::index_symbol("SP500"), Some("SPX"));
        assert_eq!(PolygonClient::index_symbol("Dow"), Some("DJI"));
        assert_eq!(PolygonClient::index_symbol("ftse"), None);
    }

    #[tokio::test]
    async fn test_unknown_index_rejected_before_network() {
        let client = PolygonClient::new(&Config::default());
        let err = client.symbol_universe("ftse").await.unwrap_err();
        assert!(matches!(err, EngineError::UnknownIndex(_)));
    }

    #[test]
    fn test_agg_bar_deserialization() {
        let json = r#"{
            "v": 70790813.0,
            "o": 173.54,
            "c": 174.92,
            "h": 175.1,
            "l": 173.11,
            "t": 1705381200000
        }"#;
        let bar: AggBar = serde_json::from_str(json).unwrap();
        assert_eq!(bar.c, 174.92);
        let converted = bar.to_bar().unwrap();
        assert_eq!(
            converted.date,
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
        );
        assert_eq!(converted.close, 174.92);
    }

    #[test]
    fn test_aggs_response_missing_results() {
        let json = r#"{"status": "OK", "queryCount": 0}"#;
        let response: AggsResponse = serde_json::from_str(json).unwrap();
        assert!(response.results.is_none());
    }

    #[test]
    fn test_constituents_page_deserialization() {
        let json = r#"{
            "results": [{"ticker": "AAPL"}, {"ticker": "MSFT"}],
            "next_url": "https://api.polygon.io/v3/reference/index_constituents?cursor=abc"
        }"#;
        let page: ConstituentsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.unwrap().len(), 2);
        assert!(page.next_url.is_some());
    }

    #[test]
    fn test_company_response_partial() {
        let json = r#"{"sector": "Technology"}"#;
        let company: CompanyResponse = serde_json::from_str(json).unwrap();
        assert_eq!(company.sector.as_deref(), Some("Technology"));
        assert!(company.shares.is_none());
    }
}
