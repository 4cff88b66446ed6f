// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

use it_core::ErrorKind;

/// All possible errors that can occur in the itrs library.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] it_core::Error),

    #[error("invalid {}:{line}: {reason}", .path.display())]
    Config {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// 2 for rejected input, 3 for a missing issue, 4 for conflicting or
    /// structurally impossible writes, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Core(e) => match e.kind() {
                ErrorKind::InvalidInput | ErrorKind::InvalidTransition => 2,
                ErrorKind::NotFound => 3,
                ErrorKind::Conflict | ErrorKind::DepthExceeded | ErrorKind::CycleDetected => 4,
                ErrorKind::Other => 1,
            },
            Error::Config { .. } | Error::Io(_) | Error::Json(_) => 1,
        }
    }
}

/// A specialized Result type for itrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
