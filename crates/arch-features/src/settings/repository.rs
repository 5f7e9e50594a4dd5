//! App-wide settings store
//!
//! Keeps the selected languages in memory for the lifetime of the root
//! scope. Registered twice: as itself, for writers, and as
//! `dyn SettingsStateProvider`, for presenters that only read.

use std::sync::Arc;

use arch_application::PresenterState;
use arch_application::ports::registry::{SCOPED_SERVICES, ScopedServiceEntry};
use arch_domain::{ContractId, ErasedArc, Error, Result, ScopeLevel};
use tokio::sync::watch;
use tracing::info;

use crate::settings::contracts::{SettingsState, SettingsStateProvider};
use crate::settings::language::supported_languages;

#[derive(Debug)]
pub struct SettingsRepository {
    state: PresenterState<SettingsState>,
}

impl SettingsRepository {
    pub fn new() -> Self {
        Self::with_state(SettingsState::default())
    }

    pub fn with_state(initial: SettingsState) -> Self {
        Self {
            state: PresenterState::new(initial),
        }
    }

    pub fn update_native(&self, language: &str) -> Result<()> {
        let language = canonical(language)?;
        self.state.update(|s| s.native_language = language.to_string());
        info!(language, "native language updated");
        Ok(())
    }

    pub fn update_learning(&self, language: &str) -> Result<()> {
        let language = canonical(language)?;
        self.state.update(|s| s.learning_language = language.to_string());
        info!(language, "learning language updated");
        Ok(())
    }
}

impl Default for SettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStateProvider for SettingsRepository {
    fn state(&self) -> watch::Receiver<SettingsState> {
        self.state.subscribe()
    }

    fn current(&self) -> SettingsState {
        self.state.get()
    }
}

fn canonical(language: &str) -> Result<&'static str> {
    supported_languages()
        .find(|name| name.eq_ignore_ascii_case(language.trim()))
        .ok_or_else(|| Error::presenter(format!("Unsupported language: {language}")))
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(SCOPED_SERVICES)]
static SETTINGS_REPOSITORY_SERVICE: ScopedServiceEntry = ScopedServiceEntry {
    service: ContractId::of::<SettingsRepository>,
    level: ScopeLevel::Root,
    description: "In-memory language settings",
    factory: |_ctx| Ok(ErasedArc::new(Arc::new(SettingsRepository::new()))),
};

#[linkme::distributed_slice(SCOPED_SERVICES)]
static SETTINGS_STATE_PROVIDER_SERVICE: ScopedServiceEntry = ScopedServiceEntry {
    service: ContractId::of::<dyn SettingsStateProvider>,
    level: ScopeLevel::Root,
    description: "Read-only view of the language settings",
    factory: |ctx| {
        let provider: Arc<dyn SettingsStateProvider> = ctx.service::<SettingsRepository>()?;
        Ok(ErasedArc::new(provider))
    },
};
