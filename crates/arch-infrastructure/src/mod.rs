//! # Infrastructure Layer
//!
//! The scope runtime plus the cross-cutting concerns around it.
//!
//! ## Module Categories
//!
//! ### Scope runtime
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Registry, scope tree, resolver, mock table, composition root |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via Figment |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use di::{
    AppContainer, MockTable, PresenterRegistry, PresenterResolver, ScopeContext, ScopeHandle,
    ScopeTree, TeardownReport, init_app, remember_presenter,
};
pub use error_ext::ErrorContext;
