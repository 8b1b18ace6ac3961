use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Polygon.io API key for market data.
    pub polygon_api_key: Option<String>,
    /// Lookback window for screening series, in months.
    pub lookback_months: u32,
    /// TTL for cached symbol-universe lookups, in seconds.
    pub universe_ttl_secs: u64,
    /// Maximum number of cached symbol universes.
    pub universe_cache_capacity: usize,
    /// Progress log interval as a fraction of the universe (0.05 = every 5%).
    pub progress_interval: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            polygon_api_key: None,
            lookback_months: 2,
            universe_ttl_secs: 24 * 60 * 60,
            universe_cache_capacity: 8,
            progress_interval: 0.05,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let lookback_months = env::var("SCREEN_LOOKBACK_MONTHS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let universe_ttl_secs = env::var("UNIVERSE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24 * 60 * 60);

        let universe_cache_capacity = env::var("UNIVERSE_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8);

        let progress_interval = env::var("PROGRESS_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &f64| *v > 0.0 && *v <= 1.0)
            .unwrap_or(0.05);

        Self {
            polygon_api_key: env::var("POLYGON_API_KEY").ok(),
            lookback_months,
            universe_ttl_secs,
            universe_cache_capacity,
            progress_interval,
        }
    }
}
