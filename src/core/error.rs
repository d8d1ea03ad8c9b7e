//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced while building or configuring a scheduler.
///
/// Job failures are never reported through this type: they travel as
/// [`anyhow::Error`] values to the installed error handler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Concurrency was supplied as something other than a number.
    #[error("\"concurrency\" should be a number")]
    TypeConstraintViolation,
    /// Concurrency was zero, negative, fractional, NaN or infinite.
    #[error("\"concurrency\" should be positive finite number")]
    RangeConstraintViolation,
    /// Configuration could not be parsed or loaded.
    #[error("config error: {0}")]
    Config(String),
}

/// Application-facing result using anyhow; the output type of asynchronous jobs.
pub type AppResult<T> = Result<T, anyhow::Error>;
