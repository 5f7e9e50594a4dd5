//! Explicit scope context
//!
//! UI code threads a [`ScopeContext`] through its calls: it carries the
//! nearest established scope and knows how to establish a new one beneath
//! it. [`remember_presenter`] is the resolve-then-init glue every render
//! pass goes through.

use std::sync::Arc;

use arch_domain::{ParamInit, Result};

use crate::di::scope::ScopeHandle;
use crate::di::teardown::TeardownReport;
use crate::di::tree::ScopeTree;

/// The nearest established scope, as seen by one UI subtree
#[derive(Clone, Debug)]
pub struct ScopeContext {
    tree: ScopeTree,
    scope: Option<ScopeHandle>,
    owned: bool,
}

impl ScopeContext {
    /// Context with no scope established yet
    pub fn new(tree: ScopeTree) -> Self {
        Self {
            tree,
            scope: None,
            owned: false,
        }
    }

    /// Context over an existing scope it does not own
    pub fn with_scope(tree: ScopeTree, scope: ScopeHandle) -> Self {
        Self {
            tree,
            scope: Some(scope),
            owned: false,
        }
    }

    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    pub fn scope(&self) -> Option<&ScopeHandle> {
        self.scope.as_ref()
    }

    /// Whether [`Self::dispose`] destroys the scope
    pub fn owns_scope(&self) -> bool {
        self.owned
    }

    /// Context for a subtree that asks for a scope of its own
    ///
    /// | established | `nested` | result                          |
    /// |-------------|----------|---------------------------------|
    /// | none        | any      | new screen scope under the root |
    /// | some        | `true`   | new sub-screen scope beneath it |
    /// | some        | `false`  | the same scope, reused          |
    ///
    /// The root is created on demand. Nesting beneath a sub-screen fails
    /// with `InvalidNesting`.
    pub fn establish(&self, nested: bool) -> Result<ScopeContext> {
        let scope = match (&self.scope, nested) {
            (None, _) => {
                let root = self.tree.ensure_root_scope()?;
                self.tree.create_child_scope(&root)?
            }
            (Some(parent), true) => self.tree.create_nested_scope(parent)?,
            (Some(parent), false) => {
                return Ok(Self::with_scope(self.tree.clone(), parent.clone()));
            }
        };
        Ok(Self {
            tree: self.tree.clone(),
            scope: Some(scope),
            owned: true,
        })
    }

    /// The established scope, or the root (created on demand)
    pub fn current(&self) -> Result<ScopeHandle> {
        match &self.scope {
            Some(scope) => Ok(scope.clone()),
            None => self.tree.ensure_root_scope(),
        }
    }

    /// Presenter for contract `C` and `key` in the current scope
    pub fn resolve<C>(&self, key: Option<&str>) -> Result<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let scope = self.current()?;
        self.tree.resolve::<C>(&scope, key)
    }

    /// Scoped service `T` visible from the current scope
    pub fn service<T>(&self) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let scope = self.current()?;
        self.tree.service::<T>(&scope)
    }

    /// Destroy the scope if this context established it
    pub fn dispose(self) -> TeardownReport {
        match (&self.scope, self.owned) {
            (Some(scope), true) => self.tree.destroy(scope),
            _ => TeardownReport::default(),
        }
    }
}

/// Resolve `C` and hand it the latest parameters
///
/// Safe on every render pass: resolution hits the cache after the first
/// call, and `init_once` keeps only the first present value.
pub fn remember_presenter<C, P>(
    ctx: &ScopeContext,
    key: Option<&str>,
    params: Option<P>,
) -> Result<Arc<C>>
where
    C: ?Sized + ParamInit<P> + Send + Sync + 'static,
{
    let presenter = ctx.resolve::<C>(key)?;
    presenter.init_once(params);
    Ok(presenter)
}
