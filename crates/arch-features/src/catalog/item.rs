//! Catalog row presenter
//!
//! Loads its article once the id arrives through `init_once`, then keeps
//! the summary translated into the native language for as long as the
//! settings change.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use arch_application::ports::registry::{PRESENTER_BINDINGS, PresenterBindingEntry};
use arch_application::{FactoryContext, PresenterState, ViewModelScope};
use arch_domain::{
    ContractId, OnceParam, ParamInit, Presenter, PresenterInstance, Result, ScopeId, ScopeLevel,
};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::catalog::bridge::CatalogBridge;
use crate::catalog::contracts::{CatalogItem, CatalogItemBridge, CatalogItemPresenter};
use crate::catalog::repository::{Article, ArticleRepo};
use crate::screen_bus::ScreenBus;
use crate::settings::{SettingsState, SettingsStateProvider, language_pair};

pub struct CatalogItemViewModel {
    scope_id: ScopeId,
    article_id: OnceParam<i64>,
    repo: Arc<dyn ArticleRepo>,
    bridge: Arc<CatalogBridge>,
    screen_bus: Arc<ScreenBus>,
    settings: Arc<dyn SettingsStateProvider>,
    scope: ViewModelScope,
    state: PresenterState<CatalogItem>,
}

impl CatalogItemViewModel {
    pub fn build(ctx: &FactoryContext<'_>) -> Result<PresenterInstance> {
        let scope = ctx.task_scope(format!("catalog-item:{}", ctx.key().unwrap_or("-")))?;
        let vm = Arc::new(Self {
            scope_id: ctx.scope_id(),
            article_id: OnceParam::new(),
            repo: ctx.service::<dyn ArticleRepo>()?,
            bridge: ctx.service::<CatalogBridge>()?,
            screen_bus: ctx.service::<ScreenBus>()?,
            settings: ctx.service::<dyn SettingsStateProvider>()?,
            state: scope.state(CatalogItem::default()),
            scope,
        });
        debug!(scope = %vm.scope_id, "catalog item presenter created");
        Ok(PresenterInstance::new::<dyn CatalogItemPresenter>(
            vm.clone(),
            vm,
        ))
    }

    fn load(&self, id: i64) {
        let repo = Arc::clone(&self.repo);
        let mut settings = self.settings.state();
        let state = self.state.clone();
        self.scope.launch(async move {
            let article = match repo.article(id).await {
                Ok(Some(article)) => article,
                Ok(None) => {
                    warn!(id, "article not found");
                    return;
                }
                Err(e) => {
                    warn!(id, error = %e, "article load failed");
                    return;
                }
            };
            loop {
                let current = settings.borrow_and_update().clone();
                let summary = translated_summary(repo.as_ref(), &article, &current).await;
                state.set(CatalogItem {
                    id: article.id,
                    title: article.title.clone(),
                    summary,
                });
                if settings.changed().await.is_err() {
                    break;
                }
            }
        });
    }
}

async fn translated_summary(
    repo: &dyn ArticleRepo,
    article: &Article,
    settings: &SettingsState,
) -> String {
    let Some((learning, native)) = language_pair(settings) else {
        return article.summary.clone();
    };
    match repo.translate_summary(article, learning, native).await {
        Ok(Some(text)) if !text.trim().is_empty() => text,
        Ok(_) => article.summary.clone(),
        Err(e) => {
            debug!(id = article.id, error = %e, "translation failed, keeping original");
            article.summary.clone()
        }
    }
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

impl CatalogItemPresenter for CatalogItemViewModel {
    fn state(&self) -> watch::Receiver<CatalogItem> {
        self.state.subscribe()
    }

    fn on_click(&self) {
        let Some(&id) = self.article_id.get() else {
            debug!(scope = %self.scope_id, "click before init, ignored");
            return;
        };
        if self.state.get().id != id {
            debug!(scope = %self.scope_id, id, "click before article loaded, ignored");
            return;
        }
        self.bridge.on_item_click(id);
        self.screen_bus
            .send(format!("Item {} clicked at {}", id, now_millis()));
    }
}

impl ParamInit<i64> for CatalogItemViewModel {
    fn init_once(&self, params: Option<i64>) {
        if let Some(&id) = self.article_id.offer(params) {
            self.load(id);
        }
    }
}

impl Presenter for CatalogItemViewModel {
    fn on_cleared(&self) -> Result<()> {
        debug!(scope = %self.scope_id, "catalog item presenter cleared");
        self.scope.cancel();
        Ok(())
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(PRESENTER_BINDINGS)]
static CATALOG_ITEM_BINDING: PresenterBindingEntry = PresenterBindingEntry {
    contract: ContractId::of::<dyn CatalogItemPresenter>,
    level: ScopeLevel::Screen,
    description: "Catalog row, initialized with an article id",
    factory: CatalogItemViewModel::build,
};
