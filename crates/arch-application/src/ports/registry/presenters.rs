//! Presenter Binding Registry
//!
//! One entry per presenter contract. The entry names the scope level whose
//! factory map it seeds; a lookup that misses in a scope falls through to
//! the maps of its ancestors.

use arch_domain::{ContractId, PresenterInstance, Result, ScopeLevel};

use crate::ports::context::FactoryContext;

/// Builds a fresh presenter inside the scope described by the context
pub type PresenterFactoryFn = fn(&FactoryContext<'_>) -> Result<PresenterInstance>;

/// Registry entry for a presenter contract
pub struct PresenterBindingEntry {
    /// Contract identity (a function so the entry stays a `static`)
    pub contract: fn() -> ContractId,
    /// Level whose scopes carry this factory
    pub level: ScopeLevel,
    /// Human-readable description
    pub description: &'static str,
    /// Factory invoked on a cache miss
    pub factory: PresenterFactoryFn,
}

#[linkme::distributed_slice]
pub static PRESENTER_BINDINGS: [PresenterBindingEntry] = [..];

/// List all presenter bindings registered at link time
///
/// Returns (contract, level, description) tuples, useful for diagnostics.
pub fn list_presenter_bindings() -> Vec<(ContractId, ScopeLevel, &'static str)> {
    PRESENTER_BINDINGS
        .iter()
        .map(|e| ((e.contract)(), e.level, e.description))
        .collect()
}
