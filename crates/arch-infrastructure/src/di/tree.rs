//! Scope tree
//!
//! ```text
//! root ──┬── screen ──┬── subscreen
//!        │            └── subscreen
//!        └── screen
//! ```
//!
//! One root per tree, any number of screens beneath it, any number of
//! sub-screens beneath each screen, nothing beneath a sub-screen.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use arch_application::TaskRuntime;
use arch_domain::{Error, Result, ScopeId, ScopeLevel};
use dashmap::DashMap;
use tracing::{debug, info};

use crate::di::mocks::MockTable;
use crate::di::registry::PresenterRegistry;
use crate::di::resolver::PresenterResolver;
use crate::di::scope::{ScopeHandle, ScopeNode};
use crate::di::teardown::TeardownReport;

struct TreeInner {
    registry: Arc<PresenterRegistry>,
    resolver: PresenterResolver,
    index: DashMap<ScopeId, Arc<ScopeNode>>,
    root: Mutex<Option<Arc<ScopeNode>>>,
}

/// Builder for [`ScopeTree`]
pub struct ScopeTreeBuilder {
    registry: Arc<PresenterRegistry>,
    runtime: Option<TaskRuntime>,
    mocks: Option<Arc<MockTable>>,
    mock_overrides: bool,
}

impl ScopeTreeBuilder {
    /// Runtime handed to presenter factories for background work
    pub fn with_runtime(mut self, runtime: TaskRuntime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Mock table to consult instead of the process-wide one
    pub fn with_mock_table(mut self, mocks: Arc<MockTable>) -> Self {
        self.mocks = Some(mocks);
        self
    }

    pub fn with_mock_overrides(mut self, enabled: bool) -> Self {
        self.mock_overrides = enabled;
        self
    }

    pub fn build(self) -> ScopeTree {
        let mocks = self.mocks.unwrap_or_else(MockTable::global);
        ScopeTree {
            inner: Arc::new(TreeInner {
                registry: self.registry,
                resolver: PresenterResolver::new(self.runtime, mocks, self.mock_overrides),
                index: DashMap::new(),
                root: Mutex::new(None),
            }),
        }
    }
}

/// The root → screen → sub-screen hierarchy of one UI host
#[derive(Clone)]
pub struct ScopeTree {
    inner: Arc<TreeInner>,
}

impl ScopeTree {
    pub fn builder(registry: Arc<PresenterRegistry>) -> ScopeTreeBuilder {
        ScopeTreeBuilder {
            registry,
            runtime: None,
            mocks: None,
            mock_overrides: true,
        }
    }

    /// Tree without a runtime, using the process-wide mock table
    pub fn new(registry: Arc<PresenterRegistry>) -> Self {
        Self::builder(registry).build()
    }

    /// Create the root scope; fails while another root is alive
    pub fn create_root_scope(&self) -> Result<ScopeHandle> {
        let mut root = self.inner.root.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = root.as_ref().filter(|r| !r.is_destroyed()) {
            return Err(Error::RootScopeExists {
                root: existing.id(),
            });
        }
        let node = ScopeNode::new(ScopeLevel::Root, None, &self.inner.registry);
        self.inner.index.insert(node.id(), Arc::clone(&node));
        *root = Some(Arc::clone(&node));
        info!(scope = %node.id(), "root scope created");
        Ok(ScopeHandle::new(node))
    }

    /// The live root, created if there is none
    pub fn ensure_root_scope(&self) -> Result<ScopeHandle> {
        match self.root() {
            Some(root) => Ok(root),
            None => self.create_root_scope(),
        }
    }

    pub fn root(&self) -> Option<ScopeHandle> {
        self.inner
            .root
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|r| !r.is_destroyed())
            .map(|r| ScopeHandle::new(Arc::clone(r)))
    }

    /// Screen scope beneath the root
    pub fn create_child_scope(&self, parent: &ScopeHandle) -> Result<ScopeHandle> {
        if parent.level() != ScopeLevel::Root {
            return Err(Error::invalid_nesting(
                parent.id(),
                parent.level(),
                ScopeLevel::Screen,
            ));
        }
        self.create_scope(parent, ScopeLevel::Screen)
    }

    /// Sub-screen scope beneath a screen
    pub fn create_nested_scope(&self, parent: &ScopeHandle) -> Result<ScopeHandle> {
        match parent.level().nested() {
            Some(level) => self.create_scope(parent, level),
            None => Err(Error::invalid_nesting(
                parent.id(),
                parent.level(),
                ScopeLevel::Subscreen,
            )),
        }
    }

    fn create_scope(&self, parent: &ScopeHandle, level: ScopeLevel) -> Result<ScopeHandle> {
        let parent_node = parent.node();
        if parent_node.is_destroyed() {
            return Err(Error::scope_destroyed(parent_node.id()));
        }
        let node = ScopeNode::new(level, Some(parent_node), &self.inner.registry);
        parent_node.add_child(Arc::clone(&node))?;
        self.inner.index.insert(node.id(), Arc::clone(&node));
        debug!(scope = %node.id(), parent = %parent_node.id(), level = %level, "scope created");
        Ok(ScopeHandle::new(node))
    }

    /// Destroy `scope` and everything nested beneath it
    ///
    /// Never fails: hook errors and panics are collected in the report.
    /// Destroying a destroyed scope returns an empty report.
    pub fn destroy(&self, scope: &ScopeHandle) -> TeardownReport {
        let node = scope.node();
        let report = node.destroy();
        if report.is_noop() {
            return report;
        }

        for id in &report.scopes {
            self.inner.index.remove(id);
        }
        if let Some(parent) = node.parent() {
            parent.remove_child(node.id());
        }

        info!(
            scope = %node.id(),
            level = %node.level(),
            scopes = report.scopes.len(),
            cleared = report.cleared,
            failures = report.failures.len(),
            "scope destroyed"
        );
        report
    }

    /// Destroy the root and wait for presenter tasks to wind down
    pub async fn shutdown(&self, grace: Duration) -> TeardownReport {
        let report = match self.root() {
            Some(root) => self.destroy(&root),
            None => TeardownReport::default(),
        };
        if let Some(runtime) = self.inner.resolver.runtime() {
            runtime.drain(grace).await;
        }
        report
    }

    /// Handle for a live scope
    pub fn scope(&self, id: ScopeId) -> Option<ScopeHandle> {
        self.inner
            .index
            .get(&id)
            .map(|node| ScopeHandle::new(Arc::clone(node.value())))
    }

    /// Number of scopes currently alive
    pub fn live_scope_count(&self) -> usize {
        self.inner.index.len()
    }

    pub fn registry(&self) -> &Arc<PresenterRegistry> {
        &self.inner.registry
    }

    pub fn resolver(&self) -> &PresenterResolver {
        &self.inner.resolver
    }

    /// Shorthand for `resolver().resolve::<C>(scope, key)`
    pub fn resolve<C>(&self, scope: &ScopeHandle, key: Option<&str>) -> Result<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.inner.resolver.resolve::<C>(scope, key)
    }

    /// Shorthand for `resolver().service::<T>(scope)`
    pub fn service<T>(&self, scope: &ScopeHandle) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.inner.resolver.service::<T>(scope)
    }
}

impl fmt::Debug for ScopeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeTree")
            .field("root", &self.root().map(|r| r.id()))
            .field("live_scopes", &self.live_scope_count())
            .field("bindings", &self.inner.registry.len())
            .finish()
    }
}
