//! Factory context
//!
//! Presenter and service factories are plain functions registered at link
//! time. When a scope invokes one, it passes a [`FactoryContext`] describing
//! where the instance will live and giving access to scoped services visible
//! from there.

use std::fmt;
use std::sync::Arc;

use arch_domain::{ContractId, ErasedArc, Error, Result, ScopeId, ScopeLevel};

use crate::lifecycle::{TaskRuntime, ViewModelScope};

/// Lookup of scoped services along a scope chain
///
/// Implemented by the scope tree. The lookup starts at the scope the
/// factory runs in and walks towards the root; the first scope whose level
/// declares the service owns (and lazily creates) the shared instance.
pub trait ServiceLocator: Send + Sync {
    fn locate(&self, service: ContractId) -> Result<ErasedArc>;
}

/// Everything a factory may use while building an instance
pub struct FactoryContext<'a> {
    scope: ScopeId,
    level: ScopeLevel,
    key: Option<&'a str>,
    locator: &'a dyn ServiceLocator,
    runtime: Option<&'a TaskRuntime>,
}

impl<'a> FactoryContext<'a> {
    pub fn new(
        scope: ScopeId,
        level: ScopeLevel,
        key: Option<&'a str>,
        locator: &'a dyn ServiceLocator,
        runtime: Option<&'a TaskRuntime>,
    ) -> Self {
        Self {
            scope,
            level,
            key,
            locator,
            runtime,
        }
    }

    /// Scope the instance will be registered in
    pub fn scope_id(&self) -> ScopeId {
        self.scope
    }

    pub fn level(&self) -> ScopeLevel {
        self.level
    }

    /// Discriminator the caller resolved with
    pub fn key(&self) -> Option<&'a str> {
        self.key
    }

    /// Scoped service `T` visible from this scope
    pub fn service<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let id = ContractId::of::<T>();
        let erased = self.locator.locate(id)?;
        erased.downcast::<T>().ok_or_else(|| Error::ContractMismatch {
            contract: id.name(),
            actual: erased.type_id().name(),
        })
    }

    /// Runtime used for presenter background work, if the tree has one
    pub fn runtime(&self) -> Option<&'a TaskRuntime> {
        self.runtime
    }

    /// A fresh task scope for the presenter being built
    pub fn task_scope(&self, label: impl Into<String>) -> Result<ViewModelScope> {
        let label = label.into();
        let runtime = self.runtime.ok_or_else(|| {
            Error::no_runtime(format!("presenter {label} in scope {} needs one", self.scope))
        })?;
        Ok(runtime.scope(label))
    }
}

impl fmt::Debug for FactoryContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryContext")
            .field("scope", &self.scope)
            .field("level", &self.level)
            .field("key", &self.key)
            .field("has_runtime", &self.runtime.is_some())
            .finish()
    }
}
