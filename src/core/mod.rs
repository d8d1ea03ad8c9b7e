//! Core scheduling abstractions and in-flight accounting.

pub mod error;
pub mod executor;
pub mod job;
pub mod scheduler;
pub mod spawn;
pub mod stats;

pub use error::{AppResult, SchedulerError};
pub use executor::JobExecutor;
pub use job::{Job, JobFuture, JobOutcome};
pub use scheduler::{Drain, ErrorHandler, Scheduler};
pub use spawn::Spawn;
pub use stats::SchedulerStats;
