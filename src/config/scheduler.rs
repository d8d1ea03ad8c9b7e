//! Scheduler configuration structures.

use serde::{Deserialize, Serialize};

use super::Concurrency;
use crate::core::SchedulerError;

/// Environment variable read by [`SchedulerConfig::from_env`].
pub const CONCURRENCY_ENV: &str = "JOB_QUEUE_CONCURRENCY";

/// Root scheduler configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum number of jobs in flight.
    #[serde(default)]
    pub concurrency: Concurrency,
}

impl SchedulerConfig {
    /// Parse scheduler configuration from a JSON string.
    ///
    /// A `concurrency` that is not a number or not a positive whole number
    /// surfaces as the matching constraint violation rather than a generic
    /// parse error.
    pub fn from_json_str(input: &str) -> Result<Self, SchedulerError> {
        let raw: serde_json::Value =
            serde_json::from_str(input).map_err(|e| SchedulerError::Config(format!("parse error: {e}")))?;
        let Some(fields) = raw.as_object() else {
            return Err(SchedulerError::Config("expected a JSON object".into()));
        };
        let concurrency = match fields.get("concurrency") {
            Some(value) => Concurrency::try_from(value)?,
            None => Concurrency::default(),
        };
        Ok(Self { concurrency })
    }

    /// Load configuration from the process environment, reading a `.env`
    /// file first when one exists.
    pub fn from_env() -> Result<Self, SchedulerError> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SchedulerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let concurrency = match lookup(CONCURRENCY_ENV) {
            Some(raw) => raw.parse()?,
            None => Concurrency::default(),
        };
        tracing::debug!(%concurrency, "scheduler config loaded");
        Ok(Self { concurrency })
    }
}
