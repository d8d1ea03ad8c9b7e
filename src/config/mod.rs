//! Configuration models for the scheduler.

pub mod concurrency;
pub mod scheduler;

pub use concurrency::Concurrency;
pub use scheduler::{SchedulerConfig, CONCURRENCY_ENV};
