//! Row click forwarding

use std::sync::{Arc, PoisonError, RwLock, Weak};

use arch_application::ports::registry::{SCOPED_SERVICES, ScopedServiceEntry};
use arch_domain::{ContractId, ErasedArc, ScopeLevel};
use tracing::debug;

use crate::catalog::contracts::CatalogItemBridge;

/// App-wide bridge; forwards clicks to the current delegate, if any
///
/// The delegate is held weakly so a torn-down catalog screen stops
/// receiving clicks without unregistering.
#[derive(Debug, Default)]
pub struct CatalogBridge {
    delegate: RwLock<Option<Weak<dyn CatalogItemBridge>>>,
}

impl CatalogBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_delegate(&self, delegate: Weak<dyn CatalogItemBridge>) {
        *self.delegate.write().unwrap_or_else(PoisonError::into_inner) = Some(delegate);
    }

    fn delegate(&self) -> Option<Arc<dyn CatalogItemBridge>> {
        self.delegate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade)
    }
}

impl CatalogItemBridge for CatalogBridge {
    fn on_item_click(&self, id: i64) {
        match self.delegate() {
            Some(delegate) => delegate.on_item_click(id),
            None => debug!(id, "item click without delegate"),
        }
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(SCOPED_SERVICES)]
static CATALOG_BRIDGE_SERVICE: ScopedServiceEntry = ScopedServiceEntry {
    service: ContractId::of::<CatalogBridge>,
    level: ScopeLevel::Root,
    description: "Catalog row click bridge",
    factory: |_ctx| Ok(ErasedArc::new(Arc::new(CatalogBridge::new()))),
};
