use thiserror::Error;

/// Unified result type for gridslide-core.
pub type Result<T> = std::result::Result<T, GridslideError>;

/// Errors surfaced to callers of the layout pipeline.
///
/// Malformed class tokens and structural anomalies (empty rows, over-wide
/// columns) never show up here; they degrade into best-effort geometry.
#[derive(Debug, Error)]
pub enum GridslideError {
    #[error("invalid geometry: {0}")]
    Configuration(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid deck config: {0}")]
    Json(#[from] serde_json::Error),
}
