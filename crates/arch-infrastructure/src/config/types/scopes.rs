//! Scope tree configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TEARDOWN_GRACE_MS;

/// Scope tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopesConfig {
    /// How long shutdown waits for cancelled presenter tasks (milliseconds)
    pub teardown_grace_ms: u64,

    /// Consult the mock override table when no binding exists.
    /// Has no effect in release builds.
    pub mock_overrides: bool,

    /// Copy link-time preview stand-ins into the mock table at startup
    pub install_previews: bool,
}

impl ScopesConfig {
    pub fn teardown_grace(&self) -> Duration {
        Duration::from_millis(self.teardown_grace_ms)
    }
}

impl Default for ScopesConfig {
    fn default() -> Self {
        Self {
            teardown_grace_ms: DEFAULT_TEARDOWN_GRACE_MS,
            mock_overrides: true,
            install_previews: true,
        }
    }
}
