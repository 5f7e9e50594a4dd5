//! Preview stand-ins
//!
//! Fixed-state presenters for preview hosts and for trees built without the
//! real bindings. They are installed into the mock table in debug builds
//! only, and never owned by a scope.

use std::sync::Arc;

use arch_application::PresenterState;
use arch_application::ports::registry::{PRESENTER_PREVIEWS, PresenterPreviewEntry};
use arch_domain::{ContractId, ErasedArc, ParamInit, Presenter};
use tokio::sync::watch;

use crate::catalog::{CatalogItem, CatalogItemPresenter};
use crate::settings::{SettingsPresenter, SettingsState};

/// Row showing canned text whatever id it is given
pub struct PreviewCatalogItem {
    state: PresenterState<CatalogItem>,
}

impl PreviewCatalogItem {
    pub fn new(title: &str, summary: &str) -> Self {
        Self {
            state: PresenterState::new(CatalogItem {
                id: 0,
                title: title.to_string(),
                summary: summary.to_string(),
            }),
        }
    }
}

impl CatalogItemPresenter for PreviewCatalogItem {
    fn state(&self) -> watch::Receiver<CatalogItem> {
        self.state.subscribe()
    }

    fn on_click(&self) {}
}

impl ParamInit<i64> for PreviewCatalogItem {
    fn init_once(&self, _params: Option<i64>) {}
}

impl Presenter for PreviewCatalogItem {}

/// Settings screen frozen on the default language pair
pub struct PreviewSettings {
    state: PresenterState<SettingsState>,
}

impl PreviewSettings {
    pub fn new() -> Self {
        Self {
            state: PresenterState::new(SettingsState::default()),
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPresenter for PreviewSettings {
    fn state(&self) -> watch::Receiver<SettingsState> {
        self.state.subscribe()
    }

    fn on_native_selected(&self, _language: &str) {}

    fn on_learning_selected(&self, _language: &str) {}
}

impl ParamInit<()> for PreviewSettings {
    fn init_once(&self, _params: Option<()>) {}
}

impl Presenter for PreviewSettings {}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(PRESENTER_PREVIEWS)]
static CATALOG_ITEM_PREVIEW: PresenterPreviewEntry = PresenterPreviewEntry {
    contract: ContractId::of::<dyn CatalogItemPresenter>,
    key: None,
    description: "Placeholder catalog row",
    factory: || {
        let item: Arc<dyn CatalogItemPresenter> =
            Arc::new(PreviewCatalogItem::new("Preview", "Lorem ipsum"));
        ErasedArc::new(item)
    },
};

#[linkme::distributed_slice(PRESENTER_PREVIEWS)]
static CATALOG_ITEM_LOADING_PREVIEW: PresenterPreviewEntry = PresenterPreviewEntry {
    contract: ContractId::of::<dyn CatalogItemPresenter>,
    key: Some("loading"),
    description: "Catalog row before its article arrives",
    factory: || {
        let item: Arc<dyn CatalogItemPresenter> = Arc::new(PreviewCatalogItem::new("", ""));
        ErasedArc::new(item)
    },
};

#[linkme::distributed_slice(PRESENTER_PREVIEWS)]
static SETTINGS_PREVIEW: PresenterPreviewEntry = PresenterPreviewEntry {
    contract: ContractId::of::<dyn SettingsPresenter>,
    key: None,
    description: "Settings with default languages",
    factory: || {
        let settings: Arc<dyn SettingsPresenter> = Arc::new(PreviewSettings::new());
        ErasedArc::new(settings)
    },
};
