//! Application error types.

use thiserror::Error;

/// Errors that can occur during application startup.
///
/// Dataset generation and tile fetching are infallible by design, so
/// configuration validation is the only fallible step.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration failed validation.
    #[error("Configuration error: {0}")]
    Config(String),
}
