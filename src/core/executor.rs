//! Reusable job bodies.

use async_trait::async_trait;

use super::AppResult;

/// A shared, reusable piece of asynchronous work.
///
/// Where a [`Job`](super::Job) is consumed by a single run, an executor can
/// back any number of jobs through [`Job::from_executor`](super::Job::from_executor).
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use job_queue::core::{AppResult, Job, JobExecutor, Scheduler};
///
/// struct Flush {
///     target: String,
/// }
///
/// #[async_trait]
/// impl JobExecutor for Flush {
///     async fn execute(&self) -> AppResult<()> {
///         tracing::info!("flushing {}", self.target);
///         Ok(())
///     }
/// }
///
/// let flush = Arc::new(Flush { target: "cache".into() });
/// let scheduler = Scheduler::new(4)?;
/// scheduler.enqueue(Job::from_executor(Arc::clone(&flush)));
/// scheduler.enqueue(Job::from_executor(flush));
/// scheduler.wait().await;
/// ```
#[async_trait]
pub trait JobExecutor: Send + Sync + 'static {
    /// Run one execution. An `Err` is reported to the scheduler's error handler.
    async fn execute(&self) -> AppResult<()>;
}
