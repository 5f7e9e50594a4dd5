//! Presenter resolution
//!
//! Lookup order for `(contract, key)` in scope `S`:
//!
//! 1. the live instance already registered in `S` under that key
//! 2. the nearest factory along `S → parent → … → root`; the new instance
//!    is registered in `S`
//! 3. debug builds only: the mock table, exact key first, then default key
//! 4. `NoBinding`
//!
//! Steps 1 and 2 run under the scope's live-instance lock, so concurrent
//! callers asking for the same key observe one instance.

use std::sync::Arc;

use arch_application::{FactoryContext, ServiceLocator, TaskRuntime};
use arch_domain::{ContractId, ErasedArc, Error, PresenterKey, Result};
use tracing::{debug, trace};

use crate::di::mocks::MockTable;
use crate::di::registry::ServiceFactory;
use crate::di::scope::{ScopeHandle, ScopeNode};

/// Resolves presenters and scoped services against scope handles
#[derive(Clone, Debug)]
pub struct PresenterResolver {
    runtime: Option<TaskRuntime>,
    mocks: Arc<MockTable>,
    mock_overrides: bool,
}

impl PresenterResolver {
    pub(crate) fn new(
        runtime: Option<TaskRuntime>,
        mocks: Arc<MockTable>,
        mock_overrides: bool,
    ) -> Self {
        Self {
            runtime,
            mocks,
            mock_overrides,
        }
    }

    /// Whether step 3 is consulted; always `false` in release builds
    pub fn mocks_enabled(&self) -> bool {
        cfg!(debug_assertions) && self.mock_overrides
    }

    pub fn mocks(&self) -> &Arc<MockTable> {
        &self.mocks
    }

    pub fn runtime(&self) -> Option<&TaskRuntime> {
        self.runtime.as_ref()
    }

    /// Live presenter for contract `C` and `key` in `scope`
    pub fn resolve<C>(&self, scope: &ScopeHandle, key: Option<&str>) -> Result<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let node = scope.node();
        let contract = ContractId::of::<C>();
        let presenter_key = PresenterKey::new(contract, key);

        {
            let mut live = node.lock_live();
            if node.is_destroyed() {
                return Err(Error::scope_destroyed(node.id()));
            }
            if let Some(instance) = live.get(&presenter_key) {
                trace!(scope = %node.id(), presenter = %presenter_key, "presenter cache hit");
                return instance.contract::<C>();
            }

            if let Some(factory) = node.find_factory(contract) {
                let locator = ChainLocator {
                    node,
                    resolver: self,
                };
                let ctx = FactoryContext::new(
                    node.id(),
                    node.level(),
                    key,
                    &locator,
                    self.runtime.as_ref(),
                );
                let instance = factory(&ctx)?;
                if instance.contract_id() != contract {
                    return Err(Error::ContractMismatch {
                        contract: contract.name(),
                        actual: instance.contract_id().name(),
                    });
                }
                let presenter = instance.contract::<C>()?;
                live.insert(presenter_key, instance);
                debug!(scope = %node.id(), level = %node.level(), presenter = %contract, key = ?key, "presenter created");
                return Ok(presenter);
            }
        }

        if self.mocks_enabled() {
            if let Some(stand_in) = self.mocks.lookup_erased(contract, key) {
                debug!(scope = %node.id(), presenter = %contract, key = ?key, "mock override used");
                return stand_in.downcast::<C>().ok_or_else(|| Error::ContractMismatch {
                    contract: contract.name(),
                    actual: stand_in.type_id().name(),
                });
            }
        }

        Err(Error::no_binding(contract.name(), key))
    }

    /// Scoped service `T` visible from `scope`
    pub fn service<T>(&self, scope: &ScopeHandle) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let service = ContractId::of::<T>();
        let locator = ChainLocator {
            node: scope.node(),
            resolver: self,
        };
        let erased = locator.locate(service)?;
        erased.downcast::<T>().ok_or_else(|| Error::ContractMismatch {
            contract: service.name(),
            actual: erased.type_id().name(),
        })
    }

    /// Shared instance of `service` owned by `owner`, created on first use
    fn owned_service(
        &self,
        owner: &Arc<ScopeNode>,
        service: ContractId,
        factory: &ServiceFactory,
    ) -> Result<ErasedArc> {
        if let Some(existing) = owner.lock_services().get(&service) {
            return Ok(existing.clone());
        }
        if owner.is_destroyed() {
            return Err(Error::scope_destroyed(owner.id()));
        }

        // built without the lock so the factory may ask for other services
        let locator = ChainLocator {
            node: owner,
            resolver: self,
        };
        let ctx = FactoryContext::new(
            owner.id(),
            owner.level(),
            None,
            &locator,
            self.runtime.as_ref(),
        );
        let created = factory(&ctx)?;
        if created.type_id() != service {
            return Err(Error::ContractMismatch {
                contract: service.name(),
                actual: created.type_id().name(),
            });
        }

        let mut services = owner.lock_services();
        if owner.is_destroyed() {
            return Err(Error::scope_destroyed(owner.id()));
        }
        let shared = services.entry(service).or_insert(created).clone();
        debug!(scope = %owner.id(), service = %service, "scoped service created");
        Ok(shared)
    }
}

/// Service lookup starting at one node
struct ChainLocator<'a> {
    node: &'a Arc<ScopeNode>,
    resolver: &'a PresenterResolver,
}

impl ServiceLocator for ChainLocator<'_> {
    fn locate(&self, service: ContractId) -> Result<ErasedArc> {
        for owner in self.node.chain() {
            if let Some(factory) = owner.service_factory(service) {
                let factory = Arc::clone(factory);
                return self.resolver.owned_service(&owner, service, &factory);
            }
        }
        Err(Error::NoService {
            service: service.name(),
            scope: self.node.id(),
        })
    }
}
