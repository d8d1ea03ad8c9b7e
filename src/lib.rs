//! # Job Queue
//!
//! A minimal bounded-concurrency job scheduler.
//!
//! Callers enqueue jobs; the scheduler runs at most `concurrency` of them at
//! a time, in enqueue order, and lets any number of callers await the moment
//! the backlog is empty and nothing is in flight.
//!
//! ## Key Features
//!
//! - **Bounded concurrency**: never more than the configured number of jobs in flight
//! - **Strict FIFO starts**: jobs start in the order they were enqueued
//! - **Sync and async jobs**: plain closures and futures share one queue
//! - **Failure isolation**: a failing job never stops its siblings or the scheduler
//! - **Drain waiting**: `wait()` starts the queue if needed and resolves once it is empty
//!
//! ## Usage
//!
//! ```rust,ignore
//! use job_queue::core::{Job, Scheduler};
//!
//! let scheduler = Scheduler::new(10)?;
//! scheduler.on_error(|err| tracing::warn!("job failed: {err:#}"));
//!
//! scheduler.enqueue(Job::from_fn(|| println!("synchronous work")));
//! scheduler.enqueue(Job::from_async(|| async {
//!     tokio::time::sleep(std::time::Duration::from_millis(15)).await;
//!     Ok(())
//! }));
//!
//! scheduler.wait().await;
//! assert_eq!(scheduler.jobs(), 0);
//! ```
//!
//! Failures of asynchronous jobs (an `Err` result or a panic inside the
//! future) go to the error handler, or are dropped when none is installed.
//! A panic raised while *invoking* a job is not intercepted and unwinds out
//! of `start()`/`wait()`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions and in-flight accounting.
pub mod core;
/// Configuration models for concurrency and environment loading.
pub mod config;
/// Builders to construct schedulers from configuration.
pub mod builders;
/// Runtime adapters.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::core::{Job, Scheduler, SchedulerError};
