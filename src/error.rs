//! Error types for map rendering.

use crate::domain::Status;
use thiserror::Error;

/// Errors that can occur while writing an obfuscation map.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The report producer left a symbol in a state other than Renamed or
    /// Skipped. The report is inconsistent and cannot be rendered.
    #[error("{symbol} has status {status}, expected Renamed or Skipped")]
    UnexpectedStatus { symbol: String, status: Status },
}

pub type Result<T> = std::result::Result<T, RenderError>;
