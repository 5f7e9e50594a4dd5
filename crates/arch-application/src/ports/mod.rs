//! Application Ports
//!
//! - **context** - what a factory receives while building an instance
//! - **registry/** - link-time registries for bindings, services and previews

/// Factory context and scoped service lookup
pub mod context;
/// Link-time registries
pub mod registry;

pub use context::{FactoryContext, ServiceLocator};
pub use registry::{
    PRESENTER_BINDINGS, PRESENTER_PREVIEWS, PresenterBindingEntry, PresenterFactoryFn,
    PresenterPreviewEntry, SCOPED_SERVICES, ScopedServiceEntry, ServiceFactoryFn,
    list_presenter_bindings, list_presenter_previews, list_scoped_services,
};
