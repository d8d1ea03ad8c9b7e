//! Tokio runtime spawner implementation.

use std::future::Future;
use std::sync::Arc;

use crate::core::Spawn;

/// Tokio-based spawner that executes job futures on a tokio runtime.
///
/// The default spawner targets whichever runtime is current when a job is
/// dispatched; [`TokioSpawner::new`] pins it to a specific runtime.
#[derive(Clone, Debug, Default)]
pub struct TokioSpawner {
    handle: Option<Arc<tokio::runtime::Handle>>,
}

impl TokioSpawner {
    /// Create a `TokioSpawner` bound to a tokio runtime handle.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self {
            handle: Some(Arc::new(handle)),
        }
    }

    /// Bind to the runtime of the calling context, if there is one.
    pub fn try_current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

impl Spawn for TokioSpawner {
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match &self.handle {
            Some(handle) => {
                handle.spawn(fut);
            }
            None => {
                tokio::spawn(fut);
            }
        }
    }
}
