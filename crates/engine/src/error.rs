// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use arrow::error::ArrowError;
use datafusion::error::DataFusionError;

/// Engine error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Planning or execution failure reported by DataFusion
    #[error("{0}")]
    DataFusion(#[from] DataFusionError),

    /// Arrow error while formatting or slicing results
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The session was stopped and can no longer be used
    #[error("Session '{0}' has been stopped")]
    SessionStopped(String),

    /// Mutex poisoned error
    #[error("Mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Invalid session or reader option
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    /// Short category label, used when reporting a failed statement
    pub fn kind(&self) -> &'static str {
        match self {
            Error::DataFusion(e) => match e.find_root() {
                DataFusionError::SQL(..)
                | DataFusionError::Plan(_)
                | DataFusionError::SchemaError(..)
                | DataFusionError::NotImplemented(_) => "plan",
                DataFusionError::IoError(_) | DataFusionError::ObjectStore(_) => "io",
                DataFusionError::ArrowError(..) => "arrow",
                _ => "execution",
            },
            Error::Arrow(_) => "arrow",
            Error::Io(_) => "io",
            Error::SessionStopped(_) | Error::MutexPoisoned(_) => "session",
            Error::InvalidOption(_) => "config",
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
