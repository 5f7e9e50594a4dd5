//! Catalog contracts

use arch_domain::{ParamInit, Presenter};
use tokio::sync::watch;

/// One rendered catalog row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: i64,
    pub title: String,
    pub summary: String,
}

/// The article list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    pub item_ids: Vec<i64>,
    pub is_loading: bool,
    /// Last item opened through the bridge
    pub opened: Option<i64>,
    pub error: Option<String>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            item_ids: Vec::new(),
            is_loading: true,
            opened: None,
            error: None,
        }
    }
}

/// Receives row clicks on behalf of whoever shows the catalog
pub trait CatalogItemBridge: Send + Sync {
    fn on_item_click(&self, id: i64);
}

pub trait CatalogPresenter: Presenter + ParamInit<()> {
    fn state(&self) -> watch::Receiver<CatalogState>;
    fn on_refresh(&self);
}

/// Presenter for one row; initialized with the article id
pub trait CatalogItemPresenter: Presenter + ParamInit<i64> {
    fn state(&self) -> watch::Receiver<CatalogItem>;
    fn on_click(&self);
}
