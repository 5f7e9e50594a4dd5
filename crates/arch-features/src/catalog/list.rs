//! Catalog list presenter

use std::sync::Arc;

use arch_application::ports::registry::{PRESENTER_BINDINGS, PresenterBindingEntry};
use arch_application::{FactoryContext, PresenterState, ViewModelScope};
use arch_domain::{ContractId, ParamInit, Presenter, PresenterInstance, Result, ScopeLevel};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::catalog::bridge::CatalogBridge;
use crate::catalog::contracts::{CatalogItemBridge, CatalogPresenter, CatalogState};
use crate::catalog::repository::ArticleRepo;

/// Loads the article ids and receives row clicks through the bridge
pub struct CatalogViewModel {
    repo: Arc<dyn ArticleRepo>,
    scope: ViewModelScope,
    state: PresenterState<CatalogState>,
}

impl CatalogViewModel {
    pub fn build(ctx: &FactoryContext<'_>) -> Result<PresenterInstance> {
        let repo = ctx.service::<dyn ArticleRepo>()?;
        let bridge = ctx.service::<CatalogBridge>()?;
        let scope = ctx.task_scope("catalog")?;
        let state = scope.state(CatalogState::default());

        let vm = Arc::new(Self { repo, scope, state });
        let delegate: Arc<dyn CatalogItemBridge> = vm.clone();
        bridge.set_delegate(Arc::downgrade(&delegate));
        vm.load(false);
        Ok(PresenterInstance::new::<dyn CatalogPresenter>(vm.clone(), vm))
    }

    fn load(&self, refresh: bool) {
        let repo = Arc::clone(&self.repo);
        let state = self.state.clone();
        self.scope.launch(async move {
            if refresh {
                if let Err(e) = repo.refresh().await {
                    warn!(error = %e, "catalog refresh failed");
                }
            }
            match repo.articles().await {
                Ok(articles) => {
                    let ids = articles.iter().map(|a| a.id).collect();
                    state.update(|s| {
                        s.item_ids = ids;
                        s.is_loading = false;
                        s.error = None;
                    });
                }
                Err(e) => {
                    state.update(|s| {
                        s.is_loading = false;
                        s.error = Some(e.to_string());
                    });
                }
            }
        });
    }
}

impl CatalogPresenter for CatalogViewModel {
    fn state(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    fn on_refresh(&self) {
        self.state.update(|s| s.is_loading = true);
        self.load(true);
    }
}

impl CatalogItemBridge for CatalogViewModel {
    fn on_item_click(&self, id: i64) {
        info!(id, "catalog item opened");
        self.state.update(|s| s.opened = Some(id));
    }
}

impl ParamInit<()> for CatalogViewModel {
    fn init_once(&self, _params: Option<()>) {}
}

impl Presenter for CatalogViewModel {
    fn on_cleared(&self) -> Result<()> {
        self.scope.cancel();
        Ok(())
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(PRESENTER_BINDINGS)]
static CATALOG_BINDING: PresenterBindingEntry = PresenterBindingEntry {
    contract: ContractId::of::<dyn CatalogPresenter>,
    level: ScopeLevel::Screen,
    description: "Article list",
    factory: CatalogViewModel::build,
};
