// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for it-core operations.

use thiserror::Error;

/// All possible errors that can occur in it-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid state transition: cannot go from {from} to {to}\n  hint: from '{from}' you can go to: {valid_targets}")]
    InvalidTransition {
        from: String,
        to: String,
        valid_targets: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("depth exceeded: {0}")]
    DepthExceeded(String),

    #[error("cycle detected: {0}")]
    CycleDetected(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// Coarse classification of an [`Error`], used by callers that map failures
/// onto exit codes or retry policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    InvalidTransition,
    NotFound,
    Conflict,
    DepthExceeded,
    CycleDetected,
    Other,
}

impl Error {
    /// Returns the typed kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Conflict(_) => ErrorKind::Conflict,
            Error::DepthExceeded(_) => ErrorKind::DepthExceeded,
            Error::CycleDetected(_) => ErrorKind::CycleDetected,
            Error::Database(_) | Error::Io(_) | Error::Json(_) | Error::CorruptedData(_) => {
                ErrorKind::Other
            }
        }
    }

    pub(crate) fn issue_not_found(id: &str) -> Self {
        Error::NotFound(format!("issue '{id}' not found"))
    }
}

/// A specialized Result type for it-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
