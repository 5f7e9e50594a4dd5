//! Counter presenter through the scope runtime

use std::sync::Arc;

use arch_features::CounterPresenter;
use arch_infrastructure::remember_presenter;

use super::helpers::app;

#[tokio::test]
async fn test_counter_keeps_first_start_value() {
    let app = app();
    app.start().unwrap();
    let screen = app.context().establish(false).unwrap();

    let counter = remember_presenter::<dyn CounterPresenter, i64>(&screen, None, Some(5)).unwrap();
    counter.on_increment();
    // a later render pass offers a different start value
    let again = remember_presenter::<dyn CounterPresenter, i64>(&screen, None, Some(100)).unwrap();

    assert!(Arc::ptr_eq(&counter, &again));
    assert_eq!(*counter.state().borrow(), 6);
}

#[tokio::test]
async fn test_counter_per_screen() {
    let app = app();
    app.start().unwrap();
    let one = app.context().establish(false).unwrap();
    let two = app.context().establish(false).unwrap();

    let a = remember_presenter::<dyn CounterPresenter, i64>(&one, None, None).unwrap();
    let b = remember_presenter::<dyn CounterPresenter, i64>(&two, None, None).unwrap();
    a.on_increment();

    assert_eq!(*a.state().borrow(), 1);
    assert_eq!(*b.state().borrow(), 0);
}

#[tokio::test]
async fn test_counter_state_frozen_after_teardown() {
    let app = app();
    app.start().unwrap();
    let screen = app.context().establish(false).unwrap();
    let counter = remember_presenter::<dyn CounterPresenter, i64>(&screen, None, None).unwrap();
    counter.on_increment();
    let rx = counter.state();

    let report = screen.dispose();
    assert!(report.is_clean());
    counter.on_increment();

    assert_eq!(*rx.borrow(), 1);
}
