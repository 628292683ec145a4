//! Tests for tokio spawner utilities

use slurm_watch::core::{Spawn, WatchError};
use slurm_watch::runtime::TokioSpawner;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner
        .spawn(async move {
            tx.send(123).unwrap();
        })
        .unwrap();

    let result = rx.await.expect("oneshot result");
    assert_eq!(result, 123);
}

#[test]
fn test_spawner_outside_runtime() {
    assert!(matches!(TokioSpawner::current(), Err(WatchError::Spawn(_))));
    let err = TokioSpawner::default().spawn(async {}).unwrap_err();
    assert!(matches!(err, WatchError::Spawn(_)));
}

#[test]
fn test_pinned_handle_spawns_from_plain_thread() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let spawner = TokioSpawner::new(runtime.handle().clone());

    let (tx, rx) = std::sync::mpsc::channel();
    spawner
        .spawn(async move {
            tx.send("done").unwrap();
        })
        .unwrap();
    assert_eq!(rx.recv().unwrap(), "done");
}
