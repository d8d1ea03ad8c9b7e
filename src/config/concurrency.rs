//! Validated concurrency ceiling.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::SchedulerError;

/// Maximum number of jobs a scheduler keeps in flight.
///
/// Always a whole number of at least one. Untyped inputs (floats, JSON
/// values, text) are checked through the `TryFrom`/`FromStr` impls, which
/// separate "not a number" from "not a usable number".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "usize")]
pub struct Concurrency(NonZeroUsize);

impl Concurrency {
    /// Ceiling used when none is configured.
    pub const DEFAULT: Self = Self(match NonZeroUsize::new(10) {
        Some(n) => n,
        None => unreachable!(),
    });

    /// Validate a whole-number ceiling.
    pub fn new(value: usize) -> Result<Self, SchedulerError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(SchedulerError::RangeConstraintViolation)
    }

    /// The ceiling as a plain count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Concurrency {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Concurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Concurrency> for usize {
    fn from(value: Concurrency) -> Self {
        value.get()
    }
}

impl TryFrom<usize> for Concurrency {
    type Error = SchedulerError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<f64> for Concurrency {
    type Error = SchedulerError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 1.0 || value.fract() != 0.0 || value >= usize::MAX as f64 {
            return Err(SchedulerError::RangeConstraintViolation);
        }
        Self::new(value as usize)
    }
}

impl TryFrom<&serde_json::Value> for Concurrency {
    type Error = SchedulerError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        if let Some(n) = value.as_u64() {
            return usize::try_from(n)
                .map_err(|_| SchedulerError::RangeConstraintViolation)
                .and_then(Self::new);
        }
        match value.as_f64() {
            Some(n) => Self::try_from(n),
            None => Err(SchedulerError::TypeConstraintViolation),
        }
    }
}

impl TryFrom<serde_json::Value> for Concurrency {
    type Error = SchedulerError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl FromStr for Concurrency {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<usize>() {
            return Self::new(n);
        }
        let n: f64 = trimmed
            .parse()
            .map_err(|_| SchedulerError::TypeConstraintViolation)?;
        Self::try_from(n)
    }
}
