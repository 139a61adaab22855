//! Error types for missionkit-script

use thiserror::Error;

/// Pack loading error type
///
/// These cover whole-file failures. A single malformed entry inside an
/// otherwise valid pack is not an error: it is skipped with a log line and
/// the rest of the pack loads.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Invalid pack format: {0}")]
    InvalidFormat(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
