//! # Archstarter
//!
//! Scoped presenter resolution for a single UI tree: an app scope, one
//! screen scope per navigation destination and sub-screen scopes beneath
//! screens, each owning the presenters built in it.
//!
//! ## Example
//!
//! ```ignore
//! use arch::infrastructure::config::AppConfig;
//! use arch::{CounterPresenter, NavHost, init_app};
//!
//! let host = NavHost::start(init_app(AppConfig::default())?)?;
//! let screen = host.current().unwrap().context();
//! let counter = arch::remember_presenter::<dyn CounterPresenter, i64>(screen, None, Some(1))?;
//! counter.on_increment();
//! ```
//!
//! ## Architecture
//!
//! - `domain` - presenter contracts, identities and errors
//! - `application` - link-time registries and the presenter lifecycle kit
//! - `infrastructure` - scope tree, resolver, mock table, config, logging
//! - `features` - catalog, detail, onboarding, settings and counter presenters
//! - [`host`] / [`script`] - navigation back stack and its text driver

pub mod host;
pub mod init;
pub mod script;

/// Domain layer - presenter contracts and errors
pub mod domain {
    pub use arch_domain::*;
}

/// Application layer - link-time registries and lifecycle kit
pub mod application {
    pub use arch_application::*;
}

/// Infrastructure layer - scope runtime, config and logging
pub mod infrastructure {
    pub use arch_infrastructure::*;
}

/// Feature presenters registered at link time
pub mod features {
    pub use arch_features::*;
}

pub use domain::{Error, ParamInit, Presenter, Result, ScopeLevel};
pub use features::{CatalogItemPresenter, CatalogPresenter, CounterPresenter, SettingsPresenter};
pub use host::{BackStackEntry, Destination, NavHost};
pub use infrastructure::{AppContainer, ScopeContext, init_app, remember_presenter};
pub use init::run;
pub use script::{Command, ScriptRunner, parse_script};
