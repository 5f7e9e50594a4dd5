//! Scope nodes
//!
//! A node owns the presenters created in it, the scoped services its level
//! declares, and its nested children. Parents hold children strongly;
//! children hold their parent weakly.

use std::collections::HashMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use arch_domain::{
    ContractId, ErasedArc, Error, PresenterInstance, PresenterKey, Result, ScopeId, ScopeLevel,
};
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::di::registry::{PresenterFactory, PresenterRegistry, ServiceFactory};
use crate::di::teardown::{TeardownFailure, TeardownReport};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) struct ScopeNode {
    id: ScopeId,
    level: ScopeLevel,
    parent: Option<Weak<ScopeNode>>,
    factories: HashMap<ContractId, PresenterFactory>,
    service_factories: HashMap<ContractId, ServiceFactory>,
    destroyed: AtomicBool,
    live: Mutex<IndexMap<PresenterKey, PresenterInstance>>,
    services: Mutex<IndexMap<ContractId, ErasedArc>>,
    children: Mutex<Vec<Arc<ScopeNode>>>,
}

impl ScopeNode {
    /// New node whose factory map is seeded from the bindings for `level`
    pub(crate) fn new(
        level: ScopeLevel,
        parent: Option<&Arc<ScopeNode>>,
        registry: &PresenterRegistry,
    ) -> Arc<Self> {
        let factories = registry
            .presenters_for(level)
            .map(|b| (b.contract(), Arc::clone(b.factory())))
            .collect();
        let service_factories = registry
            .services_for(level)
            .map(|b| (b.service(), Arc::clone(b.factory())))
            .collect();
        Arc::new(Self {
            id: ScopeId::next(),
            level,
            parent: parent.map(Arc::downgrade),
            factories,
            service_factories,
            destroyed: AtomicBool::new(false),
            live: Mutex::new(IndexMap::new()),
            services: Mutex::new(IndexMap::new()),
            children: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn id(&self) -> ScopeId {
        self.id
    }

    pub(crate) fn level(&self) -> ScopeLevel {
        self.level
    }

    pub(crate) fn parent(&self) -> Option<Arc<ScopeNode>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub(crate) fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }

    /// This node followed by its ancestors up to the root
    pub(crate) fn chain(self: &Arc<Self>) -> impl Iterator<Item = Arc<ScopeNode>> {
        std::iter::successors(Some(Arc::clone(self)), |node| node.parent())
    }

    /// Nearest factory for `contract` along the chain
    pub(crate) fn find_factory(self: &Arc<Self>, contract: ContractId) -> Option<PresenterFactory> {
        self.chain()
            .find_map(|node| node.factories.get(&contract).map(Arc::clone))
    }

    pub(crate) fn service_factory(&self, service: ContractId) -> Option<&ServiceFactory> {
        self.service_factories.get(&service)
    }

    /// Live instances, locked; resolution holds this across construction
    pub(crate) fn lock_live(&self) -> MutexGuard<'_, IndexMap<PresenterKey, PresenterInstance>> {
        lock(&self.live)
    }

    pub(crate) fn lock_services(&self) -> MutexGuard<'_, IndexMap<ContractId, ErasedArc>> {
        lock(&self.services)
    }

    pub(crate) fn add_child(&self, child: Arc<ScopeNode>) -> Result<()> {
        let mut children = lock(&self.children);
        if self.is_destroyed() {
            return Err(Error::scope_destroyed(self.id));
        }
        children.push(child);
        Ok(())
    }

    pub(crate) fn remove_child(&self, id: ScopeId) {
        lock(&self.children).retain(|child| child.id != id);
    }

    pub(crate) fn child_ids(&self) -> Vec<ScopeId> {
        lock(&self.children).iter().map(|c| c.id).collect()
    }

    /// Tear down this subtree: children first, then own instances in
    /// reverse creation order. A second call is a no-op.
    pub(crate) fn destroy(&self) -> TeardownReport {
        let mut report = TeardownReport::default();
        if self.destroyed.swap(true, Ordering::AcqRel) {
            return report;
        }

        let children = std::mem::take(&mut *lock(&self.children));
        for child in children.iter().rev() {
            report.merge(child.destroy());
        }

        let live = std::mem::take(&mut *self.lock_live());
        for (key, instance) in live.into_iter().rev() {
            report.cleared += 1;
            let outcome = catch_unwind(AssertUnwindSafe(|| instance.lifecycle().on_cleared()));
            let failure = match outcome {
                Ok(Ok(())) => {
                    debug!(scope = %self.id, presenter = %key, "presenter cleared");
                    continue;
                }
                Ok(Err(error)) => TeardownFailure::from_error(self.id, key.to_string(), &error),
                Err(payload) => TeardownFailure::from_panic(self.id, key.to_string(), &*payload),
            };
            warn!(
                scope = %self.id,
                presenter = %key,
                panicked = failure.panicked,
                error = %failure.message,
                "presenter teardown failed"
            );
            report.failures.push(failure);
        }

        let services = std::mem::take(&mut *self.lock_services());
        drop(services);

        report.scopes.push(self.id);
        report
    }
}

impl fmt::Debug for ScopeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeNode")
            .field("id", &self.id)
            .field("level", &self.level)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

/// Caller-side handle to one scope
///
/// Cheap to clone. A handle outlives the scope it names: once the scope is
/// destroyed, resolving through the handle fails with `ScopeDestroyed`.
#[derive(Clone)]
pub struct ScopeHandle {
    node: Arc<ScopeNode>,
}

impl ScopeHandle {
    pub(crate) fn new(node: Arc<ScopeNode>) -> Self {
        Self { node }
    }

    pub(crate) fn node(&self) -> &Arc<ScopeNode> {
        &self.node
    }

    pub fn id(&self) -> ScopeId {
        self.node.id()
    }

    pub fn level(&self) -> ScopeLevel {
        self.node.level()
    }

    /// Identity of the enclosing scope, `None` for the root
    pub fn parent_id(&self) -> Option<ScopeId> {
        self.node.parent().map(|p| p.id())
    }

    pub fn is_destroyed(&self) -> bool {
        self.node.is_destroyed()
    }

    /// Keys of the presenters living in this scope, in creation order
    pub fn live_keys(&self) -> Vec<PresenterKey> {
        self.node.lock_live().keys().cloned().collect()
    }

    pub fn live_count(&self) -> usize {
        self.node.lock_live().len()
    }

    /// Nested scopes currently hanging off this one
    pub fn child_ids(&self) -> Vec<ScopeId> {
        self.node.child_ids()
    }
}

impl PartialEq for ScopeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ScopeHandle {}

impl fmt::Debug for ScopeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeHandle")
            .field("id", &self.id())
            .field("level", &self.level())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
