//! Market-data providers.
//!
//! Each provider implements [`crate::screener::MarketData`]; the engine
//! itself never talks HTTP directly.

mod polygon;

pub use polygon::PolygonClient;
