//! Bounded-concurrency scheduler.
//!
//! The [`Scheduler`] owns a FIFO backlog of jobs, a count of in-flight jobs,
//! an optional error handler and the list of callers waiting for drain.
//! Jobs are started strictly in enqueue order and never more than
//! `concurrency` at a time. A failing job only ever affects itself.
//!
//! Synchronous jobs run inside the dispatch loop and free their slot before
//! the next one is considered. Asynchronous jobs hand their future to the
//! [`Spawn`] implementation; when it settles the slot is released and the
//! dispatch loop runs again from that task.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::FutureExt;
use parking_lot::{Mutex, RwLock};
use tokio::sync::oneshot;

use super::stats::SchedulerCounters;
use super::{Job, JobFuture, JobOutcome, SchedulerError, SchedulerStats, Spawn};
use crate::config::Concurrency;
use crate::runtime::TokioSpawner;

/// Callback receiving every asynchronous job failure.
pub type ErrorHandler = Arc<dyn Fn(anyhow::Error) + Send + Sync + 'static>;

/// Backlog and accounting, always mutated under one lock.
struct QueueState {
    backlog: VecDeque<Job>,
    in_flight: usize,
    waiters: Vec<oneshot::Sender<()>>,
}

struct Shared<S> {
    concurrency: Concurrency,
    state: Mutex<QueueState>,
    on_error: RwLock<Option<ErrorHandler>>,
    counters: SchedulerCounters,
    spawner: S,
}

/// Occupied concurrency slot. Dropping it releases the slot, including
/// while unwinding out of a panicking synchronous job.
struct InFlightSlot<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Drop for InFlightSlot<S> {
    fn drop(&mut self) {
        self.shared.state.lock().in_flight -= 1;
    }
}

/// Job scheduler running at most `concurrency` jobs at a time.
///
/// Cloning yields another handle to the same queue.
///
/// # Example
///
/// ```rust,ignore
/// use job_queue::core::{Job, Scheduler};
///
/// let scheduler = Scheduler::new(4)?;
/// scheduler.on_error(|err| tracing::error!("job failed: {err:#}"));
///
/// for url in urls {
///     scheduler.enqueue(Job::from_async(move || fetch(url)));
/// }
///
/// // Starts the queue if needed and resolves once everything settled.
/// scheduler.wait().await;
/// ```
pub struct Scheduler<S = TokioSpawner> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for Scheduler<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Scheduler<TokioSpawner> {
    /// Create a tokio-backed scheduler. Zero is rejected.
    pub fn new(concurrency: usize) -> Result<Self, SchedulerError> {
        Ok(Self::with_spawner(
            Concurrency::new(concurrency)?,
            TokioSpawner::default(),
        ))
    }
}

impl Default for Scheduler<TokioSpawner> {
    fn default() -> Self {
        Self::with_spawner(Concurrency::DEFAULT, TokioSpawner::default())
    }
}

impl<S> Scheduler<S> {
    /// Create a scheduler that drives asynchronous jobs through `spawner`.
    pub fn with_spawner(concurrency: Concurrency, spawner: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                concurrency,
                state: Mutex::new(QueueState {
                    backlog: VecDeque::new(),
                    in_flight: 0,
                    waiters: Vec::new(),
                }),
                on_error: RwLock::new(None),
                counters: SchedulerCounters::default(),
                spawner,
            }),
        }
    }

    /// Number of jobs waiting to be started.
    pub fn pending_jobs(&self) -> usize {
        self.shared.state.lock().backlog.len()
    }

    /// Number of jobs started but not yet finished.
    pub fn jobs(&self) -> usize {
        self.shared.state.lock().in_flight
    }

    /// Configured concurrency ceiling.
    pub fn concurrency(&self) -> Concurrency {
        self.shared.concurrency
    }

    /// Snapshot of current shape and lifetime totals.
    pub fn stats(&self) -> SchedulerStats {
        let (in_flight, pending) = {
            let state = self.shared.state.lock();
            (state.in_flight, state.backlog.len())
        };
        self.shared
            .counters
            .snapshot(self.shared.concurrency.get(), in_flight, pending)
    }

    /// Append a job to the backlog. Does not start it.
    pub fn enqueue(&self, job: Job) {
        let pending = {
            let mut state = self.shared.state.lock();
            state.backlog.push_back(job);
            state.backlog.len()
        };
        self.shared.counters.submitted.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(pending, "job enqueued");
    }

    /// Install the error handler, replacing any previous one.
    ///
    /// Only failures settling after this call are reported.
    pub fn on_error<F>(&self, handler: F)
    where
        F: Fn(anyhow::Error) + Send + Sync + 'static,
    {
        self.set_error_handler(Arc::new(handler));
    }

    /// Install an already shared error handler.
    pub fn set_error_handler(&self, handler: ErrorHandler) {
        *self.shared.on_error.write() = Some(handler);
    }
}

impl<S> Scheduler<S>
where
    S: Spawn + Send + Sync + 'static,
{
    /// Start as many backlog jobs as the concurrency ceiling allows.
    ///
    /// Calling it again while saturated or empty changes nothing.
    ///
    /// # Panics
    ///
    /// A panic raised while invoking a synchronous job (or while building an
    /// asynchronous job's future) is not caught and unwinds out of this call.
    /// The job's slot is released first, so the scheduler stays usable.
    pub fn start(&self) {
        self.shared.dispatch();
    }

    /// Wait until the backlog is empty and no job is in flight.
    ///
    /// Starts the queue when nothing is running yet. Never fails: job errors
    /// go to the error handler. Any number of callers may wait at once.
    pub fn wait(&self) -> Drain {
        loop {
            let mut state = self.shared.state.lock();
            if state.in_flight == 0 {
                if state.backlog.is_empty() {
                    return Drain { rx: None };
                }
                // Idle with work queued: nothing else will dispatch it.
                drop(state);
                self.start();
                continue;
            }
            // A settling job dispatches again and sees this waiter.
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            return Drain { rx: Some(rx) };
        }
    }
}

impl<S> Shared<S>
where
    S: Spawn + Send + Sync + 'static,
{
    fn dispatch(self: &Arc<Self>) {
        loop {
            let job = {
                let mut state = self.state.lock();
                if state.in_flight >= self.concurrency.get() {
                    return;
                }
                let Some(job) = state.backlog.pop_front() else {
                    if state.in_flight == 0 && !state.waiters.is_empty() {
                        let waiters = std::mem::take(&mut state.waiters);
                        drop(state);
                        tracing::debug!(waiters = waiters.len(), "queue drained");
                        for waiter in waiters {
                            let _ = waiter.send(());
                        }
                    }
                    return;
                };
                state.in_flight += 1;
                job
            };

            let slot = InFlightSlot {
                shared: Arc::clone(self),
            };
            match job.invoke() {
                JobOutcome::Done => {
                    drop(slot);
                    self.counters.completed.fetch_add(1, Ordering::Relaxed);
                }
                JobOutcome::Pending(fut) => self.settle(slot, fut),
            }
        }
    }

    /// Drive an asynchronous job to settlement, then free its slot and
    /// dispatch again.
    fn settle(&self, slot: InFlightSlot<S>, fut: JobFuture) {
        tracing::debug!("asynchronous job started");
        self.spawner.spawn(async move {
            let outcome = match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(result) => result,
                Err(panic) => {
                    let msg = panic_message(panic.as_ref());
                    tracing::warn!("job panicked: {msg}");
                    Err(anyhow::anyhow!("job panicked: {msg}"))
                }
            };

            let shared = Arc::clone(&slot.shared);
            match outcome {
                Ok(()) => {
                    shared.counters.completed.fetch_add(1, Ordering::Relaxed);
                }
                Err(err) => {
                    shared.counters.failed.fetch_add(1, Ordering::Relaxed);
                    shared.report(err);
                }
            }

            drop(slot);
            shared.dispatch();
        });
    }

    /// Hand a failure to the error handler. A panicking handler is contained
    /// so the settling task still releases its slot and dispatches.
    fn report(&self, err: anyhow::Error) {
        let handler = self.on_error.read().clone();
        match handler {
            Some(handler) => {
                if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| handler(err))) {
                    let msg = panic_message(panic.as_ref());
                    tracing::warn!("error handler panicked: {msg}");
                }
            }
            None => tracing::debug!("job failed with no error handler installed: {err:#}"),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl<S> fmt::Debug for Scheduler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Scheduler")
            .field("concurrency", &self.shared.concurrency.get())
            .field("in_flight", &state.in_flight)
            .field("pending", &state.backlog.len())
            .finish_non_exhaustive()
    }
}

/// Future returned by [`Scheduler::wait`]; resolves once the queue drains.
#[derive(Debug)]
#[must_use = "futures do nothing unless awaited"]
pub struct Drain {
    rx: Option<oneshot::Receiver<()>>,
}

impl Future for Drain {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        let Some(rx) = this.rx.as_mut() else {
            return Poll::Ready(());
        };
        match Pin::new(rx).poll(cx) {
            // A dropped sender still means nothing is left to wait for.
            Poll::Ready(_) => {
                this.rx = None;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
