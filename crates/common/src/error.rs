//! Unified error type for the pricing crates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsolvable goal: variable fees plus target reach {total_percent}%, pricing divisor is non-positive")]
    UnsolvableGoal { total_percent: f64 },

    #[error("fee lookup out of range: {0}")]
    LookupOutOfRange(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
