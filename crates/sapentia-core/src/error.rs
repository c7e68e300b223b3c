//! Core domain errors.

use thiserror::Error;

/// Core domain errors for Sapentia.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Role string was neither `user` nor `ai`.
    #[error("Unknown chat role: {0}")]
    UnknownRole(String),
}
