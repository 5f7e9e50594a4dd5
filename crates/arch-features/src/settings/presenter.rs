//! Settings screen presenter

use std::sync::Arc;

use arch_application::ports::registry::{PRESENTER_BINDINGS, PresenterBindingEntry};
use arch_application::{FactoryContext, PresenterState, ViewModelScope};
use arch_domain::{ContractId, ParamInit, Presenter, PresenterInstance, Result, ScopeLevel};
use tokio::sync::{broadcast, watch};
use tracing::warn;

use crate::settings::contracts::{
    LanguageChooserRole, LanguageSelectionEvent, SettingsPresenter, SettingsState,
    SettingsStateProvider,
};
use crate::settings::repository::SettingsRepository;
use crate::settings::selection::LanguageSelectionBus;

/// Mirrors the repository and applies chooser selections to it
pub struct SettingsViewModel {
    repository: Arc<SettingsRepository>,
    scope: ViewModelScope,
    state: PresenterState<SettingsState>,
}

impl SettingsViewModel {
    pub fn build(ctx: &FactoryContext<'_>) -> Result<PresenterInstance> {
        let repository = ctx.service::<SettingsRepository>()?;
        let selections = ctx.service::<LanguageSelectionBus>()?.subscribe();
        let scope = ctx.task_scope("settings")?;
        let state = scope.state(repository.current());

        let vm = Arc::new(Self {
            repository,
            scope,
            state,
        });
        vm.mirror_repository();
        vm.apply_selections(selections);
        Ok(PresenterInstance::new::<dyn SettingsPresenter>(vm.clone(), vm))
    }

    fn mirror_repository(&self) {
        let mut source = self.repository.state();
        let state = self.state.clone();
        self.scope.launch(async move {
            loop {
                let current = source.borrow_and_update().clone();
                state.set(current);
                if source.changed().await.is_err() {
                    break;
                }
            }
        });
    }

    fn apply_selections(&self, mut selections: broadcast::Receiver<LanguageSelectionEvent>) {
        let repository = Arc::clone(&self.repository);
        self.scope.launch(async move {
            loop {
                match selections.recv().await {
                    Ok(event) => apply(&repository, &event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "language selections lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }
}

fn apply(repository: &SettingsRepository, event: &LanguageSelectionEvent) {
    let result = match event.role {
        LanguageChooserRole::Native => repository.update_native(&event.language),
        LanguageChooserRole::Learning => repository.update_learning(&event.language),
    };
    if let Err(e) = result {
        warn!(role = ?event.role, error = %e, "language selection rejected");
    }
}

impl SettingsPresenter for SettingsViewModel {
    fn state(&self) -> watch::Receiver<SettingsState> {
        self.state.subscribe()
    }

    fn on_native_selected(&self, language: &str) {
        apply(
            &self.repository,
            &LanguageSelectionEvent {
                role: LanguageChooserRole::Native,
                language: language.to_string(),
            },
        );
    }

    fn on_learning_selected(&self, language: &str) {
        apply(
            &self.repository,
            &LanguageSelectionEvent {
                role: LanguageChooserRole::Learning,
                language: language.to_string(),
            },
        );
    }
}

impl ParamInit<()> for SettingsViewModel {
    fn init_once(&self, _params: Option<()>) {}
}

impl Presenter for SettingsViewModel {
    fn on_cleared(&self) -> Result<()> {
        self.scope.cancel();
        Ok(())
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(PRESENTER_BINDINGS)]
static SETTINGS_BINDING: PresenterBindingEntry = PresenterBindingEntry {
    contract: ContractId::of::<dyn SettingsPresenter>,
    level: ScopeLevel::Screen,
    description: "Language settings screen",
    factory: SettingsViewModel::build,
};
