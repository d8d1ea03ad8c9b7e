//! Builder to assemble a scheduler from configuration.

use std::sync::Arc;

use crate::config::{Concurrency, SchedulerConfig};
use crate::core::{ErrorHandler, Scheduler};
use crate::runtime::TokioSpawner;

/// Step-by-step construction of a [`Scheduler`].
///
/// ```rust,ignore
/// let scheduler = SchedulerBuilder::new()
///     .config(&SchedulerConfig::from_env()?)
///     .on_error(|err| tracing::error!("job failed: {err:#}"))
///     .build();
/// ```
#[must_use]
pub struct SchedulerBuilder<S = TokioSpawner> {
    concurrency: Concurrency,
    on_error: Option<ErrorHandler>,
    spawner: S,
}

impl SchedulerBuilder<TokioSpawner> {
    /// Start from the default concurrency and the ambient tokio runtime.
    pub fn new() -> Self {
        Self {
            concurrency: Concurrency::default(),
            on_error: None,
            spawner: TokioSpawner::default(),
        }
    }
}

impl Default for SchedulerBuilder<TokioSpawner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SchedulerBuilder<S> {
    /// Set the concurrency ceiling.
    pub fn concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Apply every setting carried by a loaded configuration.
    pub fn config(self, cfg: &SchedulerConfig) -> Self {
        self.concurrency(cfg.concurrency)
    }

    /// Install an error handler on the built scheduler.
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(anyhow::Error) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(handler));
        self
    }

    /// Drive asynchronous jobs through a different spawner.
    pub fn spawner<T>(self, spawner: T) -> SchedulerBuilder<T> {
        SchedulerBuilder {
            concurrency: self.concurrency,
            on_error: self.on_error,
            spawner,
        }
    }

    /// Configured concurrency so far.
    pub const fn current_concurrency(&self) -> Concurrency {
        self.concurrency
    }

    /// Build the scheduler.
    pub fn build(self) -> Scheduler<S> {
        let scheduler = Scheduler::with_spawner(self.concurrency, self.spawner);
        if let Some(handler) = self.on_error {
            scheduler.set_error_handler(handler);
        }
        tracing::debug!(concurrency = %self.concurrency, "scheduler built");
        scheduler
    }
}
