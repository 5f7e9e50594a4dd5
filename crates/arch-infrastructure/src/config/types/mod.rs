//! Configuration types module

pub mod app;
pub mod host;
pub mod logging;
pub mod scopes;

pub use app::AppConfig;
pub use host::HostConfig;
pub use logging::LoggingConfig;
pub use scopes::ScopesConfig;
