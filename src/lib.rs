//! Dowser - stock screening and scoring engine
//!
//! Screens a symbol universe through hard filters and chart-pattern
//! detectors, scores the qualifiers, and produces per-symbol analysis
//! reports with Fibonacci levels, a trade plan, and interpretation text.

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod detectors;
pub mod error;
pub mod indicators;
pub mod scoring;
pub mod screener;
pub mod sources;
pub mod types;

// Re-export the main entry points
pub use cache::{cache_key, CacheEntry, MemoryScreenCache, ScreenCache, TtlCache};
pub use config::Config;
pub use error::{EngineError, Result};
pub use screener::{CancelFlag, MarketData, Screener};
pub use sources::PolygonClient;
pub use types::*;
