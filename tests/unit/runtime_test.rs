//! Tests for tokio spawner utilities

use job_queue::core::Spawn;
use job_queue::runtime::tokio_spawner::TokioSpawner;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send(123).unwrap();
    });

    let result = rx.await.expect("oneshot result");
    assert_eq!(result, 123);
}

#[tokio::test]
async fn test_ambient_spawner_uses_current_runtime() {
    let spawner = TokioSpawner::default();

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send("ambient").unwrap();
    });

    assert_eq!(rx.await.unwrap(), "ambient");
}

#[test]
fn test_try_current_outside_runtime() {
    assert!(TokioSpawner::try_current().is_none());
}
