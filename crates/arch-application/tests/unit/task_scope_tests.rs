//! Tests for cancellable presenter task scopes

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use arch_application::TaskRuntime;

#[tokio::test]
async fn test_launch_runs_to_completion() {
    let runtime = TaskRuntime::current().expect("inside tokio");
    let scope = runtime.scope("loader");
    let (tx, rx) = tokio::sync::oneshot::channel();

    assert!(scope.launch(async move {
        let _ = tx.send(42);
    }));

    assert_eq!(rx.await.expect("task ran"), 42);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_outstanding_work() {
    let runtime = TaskRuntime::current().expect("inside tokio");
    let scope = runtime.scope("ticker");
    let ticks = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&ticks);
    scope.launch(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(10)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    tokio::time::sleep(Duration::from_millis(35)).await;
    scope.cancel();
    assert!(runtime.drain(Duration::from_secs(1)).await);
    let seen = ticks.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), seen);
    assert_eq!(runtime.active_tasks(), 0);
}

#[tokio::test]
async fn test_launch_after_cancel_is_refused() {
    let runtime = TaskRuntime::current().expect("inside tokio");
    let scope = runtime.scope("late");
    scope.cancel();
    scope.cancel();

    assert!(!scope.is_active());
    assert!(!scope.launch(async {}));
}

#[tokio::test]
async fn test_sibling_scopes_cancel_independently() {
    let runtime = TaskRuntime::current().expect("inside tokio");
    let first = runtime.scope("first");
    let second = runtime.scope("second");

    first.cancel();
    assert!(!first.is_active());
    assert!(second.is_active());
}

#[tokio::test]
async fn test_cancel_all_reaches_every_scope() {
    let runtime = TaskRuntime::current().expect("inside tokio");
    let first = runtime.scope("first");
    let second = runtime.scope("second");

    runtime.cancel_all();
    assert!(first.token().is_cancelled());
    assert!(!second.is_active());
}

#[tokio::test(start_paused = true)]
async fn test_drain_times_out_on_stuck_task() {
    let runtime = TaskRuntime::current().expect("inside tokio");
    let scope = runtime.scope("stuck");
    scope.launch(std::future::pending());

    assert!(!runtime.drain(Duration::from_millis(50)).await);
    scope.cancel();
    assert!(runtime.drain(Duration::from_millis(50)).await);
}
