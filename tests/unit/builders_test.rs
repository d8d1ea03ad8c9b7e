//! Tests for builder modules

use job_queue::builders::SchedulerBuilder;
use job_queue::config::{Concurrency, SchedulerConfig};
use job_queue::core::Job;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_scheduler_builder_defaults() {
    let builder = SchedulerBuilder::new();
    assert_eq!(builder.current_concurrency().get(), 10);

    let scheduler = builder.build();
    assert_eq!(scheduler.concurrency().get(), 10);
    assert_eq!(scheduler.jobs(), 0);
}

#[test]
fn test_scheduler_builder_from_config() {
    let config = SchedulerConfig::from_json_str(r#"{ "concurrency": 3 }"#).unwrap();
    let scheduler = SchedulerBuilder::new().config(&config).build();
    assert_eq!(scheduler.concurrency().get(), 3);
    assert_eq!(scheduler.stats().concurrency, 3);
}

#[tokio::test]
async fn test_scheduler_builder_installs_handler() {
    let failures = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&failures);
    let scheduler = SchedulerBuilder::default()
        .concurrency(Concurrency::new(2).unwrap())
        .on_error(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    scheduler.enqueue(Job::from_async(|| async { Err(anyhow::anyhow!("boom")) }));
    scheduler.wait().await;
    assert_eq!(failures.load(Ordering::SeqCst), 1);
}
