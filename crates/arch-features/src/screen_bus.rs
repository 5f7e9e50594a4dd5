//! Screen-wide message bus
//!
//! One instance per screen scope, shared by the screen's presenters and by
//! every row presenter living in its sub-screens.

use std::sync::Arc;

use arch_application::PresenterState;
use arch_application::ports::registry::{SCOPED_SERVICES, ScopedServiceEntry};
use arch_domain::{ContractId, ErasedArc, ScopeLevel};
use tokio::sync::watch;
use tracing::debug;

/// Text shown before anything has been sent
pub const SCREEN_BUS_INITIAL: &str = "screen bus initialized";

/// Latest message posted on the screen
#[derive(Debug)]
pub struct ScreenBus {
    text: PresenterState<String>,
}

impl ScreenBus {
    pub fn new() -> Self {
        Self {
            text: PresenterState::new(SCREEN_BUS_INITIAL.to_string()),
        }
    }

    pub fn send(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(message = %message, "screen bus message");
        self.text.set(message);
    }

    pub fn text(&self) -> String {
        self.text.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.text.subscribe()
    }
}

impl Default for ScreenBus {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(SCOPED_SERVICES)]
static SCREEN_BUS_SERVICE: ScopedServiceEntry = ScopedServiceEntry {
    service: ContractId::of::<ScreenBus>,
    level: ScopeLevel::Screen,
    description: "Per-screen message bus",
    factory: |_ctx| Ok(ErasedArc::new(Arc::new(ScreenBus::new()))),
};
