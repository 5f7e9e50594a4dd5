//! Onboarding presenter

use std::sync::Arc;

use arch_application::ports::registry::{PRESENTER_BINDINGS, PresenterBindingEntry};
use arch_application::{FactoryContext, PresenterState, ViewModelScope};
use arch_domain::{ContractId, ParamInit, Presenter, PresenterInstance, Result, ScopeLevel};
use tokio::sync::watch;
use tracing::debug;

use crate::onboarding::contracts::{OnboardingPresenter, OnboardingState, OnboardingStatusProvider};
use crate::onboarding::repository::OnboardingRepository;

/// Shows the default pages and mirrors the completion flag
pub struct OnboardingViewModel {
    repository: Arc<OnboardingRepository>,
    scope: ViewModelScope,
    state: PresenterState<OnboardingState>,
}

impl OnboardingViewModel {
    pub fn build(ctx: &FactoryContext<'_>) -> Result<PresenterInstance> {
        let repository = ctx.service::<OnboardingRepository>()?;
        let scope = ctx.task_scope("onboarding")?;
        let state = scope.state(OnboardingState {
            completed: repository.is_completed(),
            ..OnboardingState::default()
        });
        let vm = Arc::new(Self {
            repository,
            scope,
            state,
        });
        vm.mirror_completion();
        Ok(PresenterInstance::new::<dyn OnboardingPresenter>(vm.clone(), vm))
    }

    fn mirror_completion(&self) {
        let mut completed = self.repository.completed();
        let state = self.state.clone();
        self.scope.launch(async move {
            loop {
                let current = *completed.borrow_and_update();
                state.update(|s| s.completed = current);
                if completed.changed().await.is_err() {
                    break;
                }
            }
        });
    }
}

impl OnboardingPresenter for OnboardingViewModel {
    fn state(&self) -> watch::Receiver<OnboardingState> {
        self.state.subscribe()
    }

    fn on_continue(&self) {
        if self.state.get().completed {
            debug!("onboarding already completed");
            return;
        }
        self.repository.mark_completed();
    }
}

impl ParamInit<()> for OnboardingViewModel {
    fn init_once(&self, _params: Option<()>) {}
}

impl Presenter for OnboardingViewModel {
    fn on_cleared(&self) -> Result<()> {
        self.scope.cancel();
        Ok(())
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(PRESENTER_BINDINGS)]
static ONBOARDING_BINDING: PresenterBindingEntry = PresenterBindingEntry {
    contract: ContractId::of::<dyn OnboardingPresenter>,
    level: ScopeLevel::Screen,
    description: "First-run pages with a continue action",
    factory: OnboardingViewModel::build,
};
