use thiserror::Error;

/// Engine error types.
///
/// Per-symbol failures (`NoData`, `Upstream`) are caught at the symbol
/// boundary inside the orchestrator and never abort a multi-symbol run.
/// `InvalidFilter` and `UnknownIndex` surface to the caller before or
/// during universe setup.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No data for {0}")]
    NoData(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Unknown index: {0}")]
    UnknownIndex(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl EngineError {
    /// Whether this error is local to a single symbol and should be
    /// counted and skipped rather than propagated.
    pub fn is_per_symbol(&self) -> bool {
        matches!(
            self,
            EngineError::NoData(_) | EngineError::Upstream(_) | EngineError::Reqwest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
