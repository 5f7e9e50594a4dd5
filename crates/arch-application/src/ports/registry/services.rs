//! Scoped Service Registry
//!
//! Scoped services are non-presenter singletons (an event bus shared by a
//! screen and its rows, say). The scope whose level matches the entry owns
//! the instance, created lazily on first request from it or from any of its
//! descendants.

use arch_domain::{ContractId, ErasedArc, Result, ScopeLevel};

use crate::ports::context::FactoryContext;

/// Builds a service instance for the owning scope
pub type ServiceFactoryFn = fn(&FactoryContext<'_>) -> Result<ErasedArc>;

/// Registry entry for a scoped service
pub struct ScopedServiceEntry {
    /// Service identity
    pub service: fn() -> ContractId,
    /// Level of the scope that owns the instance
    pub level: ScopeLevel,
    /// Human-readable description
    pub description: &'static str,
    /// Factory invoked on first request
    pub factory: ServiceFactoryFn,
}

#[linkme::distributed_slice]
pub static SCOPED_SERVICES: [ScopedServiceEntry] = [..];

/// List all scoped services registered at link time
pub fn list_scoped_services() -> Vec<(ContractId, ScopeLevel, &'static str)> {
    SCOPED_SERVICES
        .iter()
        .map(|e| ((e.service)(), e.level, e.description))
        .collect()
}
