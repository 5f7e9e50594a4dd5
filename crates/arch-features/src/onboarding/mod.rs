//! Onboarding feature
//!
//! A fixed set of intro pages and an app-wide completion flag. Continuing
//! marks onboarding completed; the host then replaces the screen.

pub mod contracts;
pub mod presenter;
pub mod repository;

pub use contracts::{
    DEFAULT_ONBOARDING_PAGES, OnboardingPage, OnboardingPresenter, OnboardingState,
    OnboardingStatusProvider,
};
pub use presenter::OnboardingViewModel;
pub use repository::OnboardingRepository;
