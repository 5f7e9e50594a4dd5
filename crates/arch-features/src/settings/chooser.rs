//! Language chooser presenter
//!
//! The settings screen resolves one chooser per role, keyed by
//! [`LanguageChooserRole::key`], so both live side by side in one scope.

use std::sync::Arc;

use arch_application::ports::registry::{PRESENTER_BINDINGS, PresenterBindingEntry};
use arch_application::{FactoryContext, PresenterState, ViewModelScope};
use arch_domain::{
    ContractId, OnceParam, ParamInit, Presenter, PresenterInstance, Result, ScopeLevel,
};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::settings::contracts::{
    LanguageChooserParams, LanguageChooserPresenter, LanguageChooserState, LanguageSelectionEvent,
};
use crate::settings::language::{canonical_name, supported_languages};
use crate::settings::selection::LanguageSelectionBus;

pub struct LanguageChooserViewModel {
    params: OnceParam<LanguageChooserParams>,
    bus: Arc<LanguageSelectionBus>,
    scope: ViewModelScope,
    state: PresenterState<LanguageChooserState>,
}

impl LanguageChooserViewModel {
    pub fn build(ctx: &FactoryContext<'_>) -> Result<PresenterInstance> {
        let bus = ctx.service::<LanguageSelectionBus>()?;
        let scope = ctx.task_scope(format!("language-chooser:{}", ctx.key().unwrap_or("-")))?;
        let state = scope.state(LanguageChooserState::default());
        let vm = Arc::new(Self {
            params: OnceParam::new(),
            bus,
            scope,
            state,
        });
        Ok(PresenterInstance::new::<dyn LanguageChooserPresenter>(
            vm.clone(),
            vm,
        ))
    }

    fn collapse(&self) {
        self.state.update(|s| {
            s.is_expanded = false;
            s.query.clear();
        });
    }
}

fn filter(query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    supported_languages()
        .filter(|language| needle.is_empty() || language.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect()
}

impl LanguageChooserPresenter for LanguageChooserViewModel {
    fn state(&self) -> watch::Receiver<LanguageChooserState> {
        self.state.subscribe()
    }

    fn on_toggle_expanded(&self) {
        if self.state.get().is_expanded {
            self.collapse();
            return;
        }
        self.state.update(|s| {
            s.is_expanded = true;
            s.query.clear();
            s.results = filter("");
        });
    }

    fn on_dismiss(&self) {
        self.collapse();
    }

    fn on_query_change(&self, query: &str) {
        let results = filter(query);
        self.state.update(|s| {
            s.query = query.to_string();
            s.results = results;
        });
    }

    fn on_select(&self, language: &str) {
        let Some(params) = self.params.get() else {
            debug!(language, "selection before init ignored");
            return;
        };
        let Some(language) = canonical_name(language) else {
            warn!(language, "unsupported language ignored");
            return;
        };
        self.state.update(|s| {
            s.selected_language = language.to_string();
            s.is_expanded = false;
            s.query.clear();
        });
        self.bus.publish(LanguageSelectionEvent {
            role: params.role,
            language: language.to_string(),
        });
    }
}

impl ParamInit<LanguageChooserParams> for LanguageChooserViewModel {
    fn init_once(&self, params: Option<LanguageChooserParams>) {
        if let Some(accepted) = self.params.offer(params) {
            let selected = accepted.selected_language.clone();
            self.state.update(|s| {
                s.selected_language = selected;
                s.results = filter("");
            });
        }
    }
}

impl Presenter for LanguageChooserViewModel {
    fn on_cleared(&self) -> Result<()> {
        self.scope.cancel();
        Ok(())
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(PRESENTER_BINDINGS)]
static LANGUAGE_CHOOSER_BINDING: PresenterBindingEntry = PresenterBindingEntry {
    contract: ContractId::of::<dyn LanguageChooserPresenter>,
    level: ScopeLevel::Screen,
    description: "Searchable language dropdown",
    factory: LanguageChooserViewModel::build,
};
