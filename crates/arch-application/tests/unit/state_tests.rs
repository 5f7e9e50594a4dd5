//! Tests for the gated presenter state cell

use arch_application::{PresenterState, TaskRuntime};

#[test]
fn test_set_and_get() {
    let state = PresenterState::new(0u32);
    assert!(state.set(3));
    assert_eq!(state.get(), 3);
}

#[test]
fn test_update_modifies_in_place() {
    let state = PresenterState::new(vec![1, 2]);
    assert!(state.update(|v| v.push(3)));
    assert_eq!(state.get(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_subscriber_sees_latest_value() {
    let state = PresenterState::new("idle".to_string());
    let mut rx = state.subscribe();

    state.set("loading".to_string());
    state.set("ready".to_string());

    rx.changed().await.expect("sender alive");
    assert_eq!(*rx.borrow_and_update(), "ready");
}

#[tokio::test]
async fn test_writes_dropped_after_scope_cancel() {
    let runtime = TaskRuntime::current().expect("inside tokio");
    let scope = runtime.scope("counter");
    let state = scope.state(0i64);
    let rx = state.subscribe();

    assert!(state.set(1));
    scope.cancel();

    assert!(!state.set(2));
    assert!(!state.update(|v| *v += 10));
    assert!(!state.is_live());
    assert_eq!(*rx.borrow(), 1);
}

#[test]
fn test_clones_share_value() {
    let state = PresenterState::new(1u8);
    let other = state.clone();
    other.set(9);
    assert_eq!(state.get(), 9);
}
