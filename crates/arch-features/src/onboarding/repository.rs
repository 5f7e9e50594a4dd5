//! Onboarding completion flag
//!
//! Held in memory for the lifetime of the root scope. Registered as itself,
//! for the presenter that completes onboarding, and as
//! `dyn OnboardingStatusProvider`, for hosts that only read it.

use std::sync::Arc;

use arch_application::PresenterState;
use arch_application::ports::registry::{SCOPED_SERVICES, ScopedServiceEntry};
use arch_domain::{ContractId, ErasedArc, ScopeLevel};
use tokio::sync::watch;
use tracing::info;

use crate::onboarding::contracts::OnboardingStatusProvider;

#[derive(Debug)]
pub struct OnboardingRepository {
    completed: PresenterState<bool>,
}

impl OnboardingRepository {
    pub fn new() -> Self {
        Self {
            completed: PresenterState::new(false),
        }
    }

    pub fn mark_completed(&self) {
        if !self.completed.get() {
            self.completed.set(true);
            info!("onboarding completed");
        }
    }
}

impl Default for OnboardingRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingStatusProvider for OnboardingRepository {
    fn completed(&self) -> watch::Receiver<bool> {
        self.completed.subscribe()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(SCOPED_SERVICES)]
static ONBOARDING_REPOSITORY_SERVICE: ScopedServiceEntry = ScopedServiceEntry {
    service: ContractId::of::<OnboardingRepository>,
    level: ScopeLevel::Root,
    description: "In-memory onboarding completion flag",
    factory: |_ctx| Ok(ErasedArc::new(Arc::new(OnboardingRepository::new()))),
};

#[linkme::distributed_slice(SCOPED_SERVICES)]
static ONBOARDING_STATUS_SERVICE: ScopedServiceEntry = ScopedServiceEntry {
    service: ContractId::of::<dyn OnboardingStatusProvider>,
    level: ScopeLevel::Root,
    description: "Read-only view of the onboarding flag",
    factory: |ctx| {
        let provider: Arc<dyn OnboardingStatusProvider> = ctx.service::<OnboardingRepository>()?;
        Ok(ErasedArc::new(provider))
    },
};
