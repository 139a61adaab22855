//! Error types for missionkit-core

use crate::DefId;
use thiserror::Error;

/// Core error type
///
/// Nothing here is fatal to the host: an `UnknownDefinition` is a failed
/// creation, and a bad trigger config leaves a mission registered but
/// permanently unmatchable. Dangling references during event dispatch are
/// skipped rather than reported.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown mission definition: {0}")]
    UnknownDefinition(DefId),

    #[error("unknown trigger type: {0}")]
    UnknownTriggerType(String),

    #[error("invalid trigger config: {0}")]
    InvalidTriggerConfig(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

// Compile-time check that Error is Send + Sync for thread-safe error propagation.
fn _assert_error_send_sync<T: Send + Sync>() {}
fn _error_is_send_sync() {
    _assert_error_send_sync::<Error>();
}
