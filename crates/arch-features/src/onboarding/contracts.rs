//! Onboarding contracts

use arch_domain::{ParamInit, Presenter};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingPage {
    pub title: &'static str,
    pub message: &'static str,
}

/// Pages shown to a first-time user, in order
pub const DEFAULT_ONBOARDING_PAGES: &[OnboardingPage] = &[
    OnboardingPage {
        title: "Pick your pair",
        message: "Choose your from and to languages in Settings.",
    },
    OnboardingPage {
        title: "Refresh stories",
        message: "Press refresh to grab a random article.",
    },
    OnboardingPage {
        title: "Open and read",
        message: "Tap any card to open the full story.",
    },
    OnboardingPage {
        title: "Tap to translate",
        message: "Touch a word to see it in your learning language.",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingState {
    pub pages: Vec<OnboardingPage>,
    pub completed: bool,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self {
            pages: DEFAULT_ONBOARDING_PAGES.to_vec(),
            completed: false,
        }
    }
}

/// Whether the user has finished onboarding
pub trait OnboardingStatusProvider: Send + Sync {
    fn completed(&self) -> watch::Receiver<bool>;

    fn is_completed(&self) -> bool {
        *self.completed().borrow()
    }
}

pub trait OnboardingPresenter: Presenter + ParamInit<()> {
    fn state(&self) -> watch::Receiver<OnboardingState>;
    fn on_continue(&self);
}
