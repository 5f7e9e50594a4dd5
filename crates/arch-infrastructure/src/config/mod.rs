//! Configuration
//!
//! `AppConfig` is assembled by [`loader::ConfigLoader`] from defaults, an
//! optional TOML file and `ARCH_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, HostConfig, LoggingConfig, ScopesConfig};
