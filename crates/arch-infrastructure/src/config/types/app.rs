//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{HostConfig, LoggingConfig, ScopesConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Scope tree configuration
    #[serde(default)]
    pub scopes: ScopesConfig,
    /// Navigation host configuration
    #[serde(default)]
    pub host: HostConfig,
}
