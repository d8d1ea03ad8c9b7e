//! Units of work accepted by the scheduler.
//!
//! A [`Job`] is a run-once closure. Invoking it yields a [`JobOutcome`] that
//! tells the dispatch loop whether the work already finished or whether a
//! future has to settle before the slot is released.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use super::executor::JobExecutor;
use super::AppResult;

/// Future returned by an asynchronous job. `Err` marks a failed job.
pub type JobFuture = BoxFuture<'static, AppResult<()>>;

/// Result of invoking a job.
pub enum JobOutcome {
    /// The job ran to completion during invocation.
    Done,
    /// The job handed back a future; its slot stays occupied until it settles.
    Pending(JobFuture),
}

impl fmt::Debug for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => f.write_str("Done"),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// A caller-supplied unit of work, synchronous or asynchronous.
pub struct Job {
    run: Box<dyn FnOnce() -> JobOutcome + Send + 'static>,
}

impl Job {
    /// Wrap a closure that reports its own outcome.
    pub fn new<F>(run: F) -> Self
    where
        F: FnOnce() -> JobOutcome + Send + 'static,
    {
        Self { run: Box::new(run) }
    }

    /// Synchronous job: `f` runs to completion inside the dispatch loop.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::new(move || {
            f();
            JobOutcome::Done
        })
    }

    /// Asynchronous job: `f` is called at dispatch time and the returned
    /// future occupies a slot until it resolves.
    ///
    /// Anything `f` does before building the future happens synchronously,
    /// in FIFO start order.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        Self::new(move || JobOutcome::Pending(f().boxed()))
    }

    /// Asynchronous job backed by a shared executor.
    pub fn from_executor<E>(executor: Arc<E>) -> Self
    where
        E: JobExecutor + ?Sized,
    {
        Self::new(move || JobOutcome::Pending(async move { executor.execute().await }.boxed()))
    }

    /// Run the job body and report how it finished.
    pub(crate) fn invoke(self) -> JobOutcome {
        (self.run)()
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job").finish_non_exhaustive()
    }
}
