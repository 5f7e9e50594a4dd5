//! Onboarding presenter and completion flag

use arch_features::onboarding::DEFAULT_ONBOARDING_PAGES;
use arch_features::{OnboardingPresenter, OnboardingRepository, OnboardingStatusProvider};
use arch_infrastructure::remember_presenter;

use super::helpers::{app, settle};

#[tokio::test]
async fn test_pages_shown_until_continue() {
    let app = app();
    app.start().unwrap();
    let screen = app.context().establish(false).unwrap();

    let onboarding = remember_presenter::<dyn OnboardingPresenter, ()>(&screen, None, None).unwrap();
    let mut state = onboarding.state();
    let initial = state.borrow().clone();
    assert_eq!(initial.pages.len(), 4);
    assert_eq!(initial.pages[0].title, "Pick your pair");
    assert!(!initial.completed);

    onboarding.on_continue();
    settle(&mut state, |s| s.completed).await;

    let status = screen.service::<dyn OnboardingStatusProvider>().unwrap();
    assert!(status.is_completed());
}

#[tokio::test]
async fn test_completion_outlives_the_screen() {
    let app = app();
    app.start().unwrap();
    let first = app.context().establish(false).unwrap();
    remember_presenter::<dyn OnboardingPresenter, ()>(&first, None, None)
        .unwrap()
        .on_continue();
    first.dispose();

    let second = app.context().establish(false).unwrap();
    let onboarding =
        remember_presenter::<dyn OnboardingPresenter, ()>(&second, None, None).unwrap();
    assert!(onboarding.state().borrow().completed);
    assert_eq!(onboarding.state().borrow().pages, DEFAULT_ONBOARDING_PAGES.to_vec());

    // continuing again is a no-op
    onboarding.on_continue();
    let repository = second.service::<OnboardingRepository>().unwrap();
    assert!(repository.is_completed());
}
