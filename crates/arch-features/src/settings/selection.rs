//! Language selection bus
//!
//! Per-screen broadcast of chooser picks. Events published while nobody
//! listens are dropped.

use std::sync::Arc;

use arch_application::ports::registry::{SCOPED_SERVICES, ScopedServiceEntry};
use arch_domain::{ContractId, ErasedArc, ScopeLevel};
use tokio::sync::broadcast;
use tracing::trace;

use crate::settings::contracts::LanguageSelectionEvent;

const SELECTION_BUFFER: usize = 16;

#[derive(Debug)]
pub struct LanguageSelectionBus {
    tx: broadcast::Sender<LanguageSelectionEvent>,
}

impl LanguageSelectionBus {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(SELECTION_BUFFER);
        Self { tx }
    }

    pub fn publish(&self, event: LanguageSelectionEvent) {
        if self.tx.send(event).is_err() {
            trace!("language selection dropped, no listeners");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LanguageSelectionEvent> {
        self.tx.subscribe()
    }
}

impl Default for LanguageSelectionBus {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(SCOPED_SERVICES)]
static LANGUAGE_SELECTION_SERVICE: ScopedServiceEntry = ScopedServiceEntry {
    service: ContractId::of::<LanguageSelectionBus>,
    level: ScopeLevel::Screen,
    description: "Language chooser selections for one screen",
    factory: |_ctx| Ok(ErasedArc::new(Arc::new(LanguageSelectionBus::new()))),
};
