//! Presenter Provider Registry
//!
//! Maps each presenter contract to the factory that builds it and the scope
//! level whose factory map it seeds; does the same for scoped services.
//! Built once at startup, from the link-time slices and/or programmatic
//! bindings, and immutable afterwards.

use std::fmt;
use std::sync::Arc;

use arch_application::FactoryContext;
use arch_application::ports::registry::{
    PRESENTER_BINDINGS, PresenterBindingEntry, SCOPED_SERVICES, ScopedServiceEntry,
};
use arch_domain::{ContractId, ErasedArc, Error, PresenterInstance, Result, ScopeLevel};
use indexmap::IndexMap;
use tracing::{debug, info};

/// Shared presenter factory
pub type PresenterFactory =
    Arc<dyn Fn(&FactoryContext<'_>) -> Result<PresenterInstance> + Send + Sync>;

/// Shared scoped service factory
pub type ServiceFactory = Arc<dyn Fn(&FactoryContext<'_>) -> Result<ErasedArc> + Send + Sync>;

/// One registered presenter contract
#[derive(Clone)]
pub struct PresenterBinding {
    contract: ContractId,
    level: ScopeLevel,
    description: String,
    factory: PresenterFactory,
}

impl PresenterBinding {
    pub fn contract(&self) -> ContractId {
        self.contract
    }

    pub fn level(&self) -> ScopeLevel {
        self.level
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn factory(&self) -> &PresenterFactory {
        &self.factory
    }
}

impl fmt::Debug for PresenterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterBinding")
            .field("contract", &self.contract)
            .field("level", &self.level)
            .field("description", &self.description)
            .finish()
    }
}

/// One registered scoped service
#[derive(Clone)]
pub struct ServiceBinding {
    service: ContractId,
    level: ScopeLevel,
    description: String,
    factory: ServiceFactory,
}

impl ServiceBinding {
    pub fn service(&self) -> ContractId {
        self.service
    }

    pub fn level(&self) -> ScopeLevel {
        self.level
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn factory(&self) -> &ServiceFactory {
        &self.factory
    }
}

impl fmt::Debug for ServiceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceBinding")
            .field("service", &self.service)
            .field("level", &self.level)
            .field("description", &self.description)
            .finish()
    }
}

/// Immutable contract → factory registry
#[derive(Debug, Default)]
pub struct PresenterRegistry {
    presenters: IndexMap<ContractId, PresenterBinding>,
    services: IndexMap<ContractId, ServiceBinding>,
}

impl PresenterRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry holding every binding registered at link time
    pub fn from_link_time() -> Result<Self> {
        Self::builder().with_link_time_bindings().build()
    }

    /// Factory for `contract`, if registered
    pub fn lookup(&self, contract: ContractId) -> Option<&PresenterBinding> {
        self.presenters.get(&contract)
    }

    /// Presenter bindings that seed scopes of `level`
    pub fn presenters_for(&self, level: ScopeLevel) -> impl Iterator<Item = &PresenterBinding> {
        self.presenters.values().filter(move |b| b.level == level)
    }

    /// Services owned by scopes of `level`
    pub fn services_for(&self, level: ScopeLevel) -> impl Iterator<Item = &ServiceBinding> {
        self.services.values().filter(move |b| b.level == level)
    }

    /// Every presenter binding in registration order
    pub fn list(&self) -> Vec<(ContractId, ScopeLevel, &str)> {
        self.presenters
            .values()
            .map(|b| (b.contract, b.level, b.description.as_str()))
            .collect()
    }

    /// Every scoped service in registration order
    pub fn list_services(&self) -> Vec<(ContractId, ScopeLevel, &str)> {
        self.services
            .values()
            .map(|b| (b.service, b.level, b.description.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.presenters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presenters.is_empty()
    }
}

/// Collects bindings; duplicates surface when [`RegistryBuilder::build`] runs
///
/// ```ignore
/// let registry = PresenterRegistry::builder()
///     .bind::<dyn CounterPresenter, _>(ScopeLevel::Screen, "counter", |ctx| {
///         let vm = Arc::new(CounterViewModel::new(ctx.task_scope("counter")?));
///         Ok(PresenterInstance::new::<dyn CounterPresenter>(vm.clone(), vm))
///     })
///     .build()?;
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    presenters: IndexMap<ContractId, PresenterBinding>,
    services: IndexMap<ContractId, ServiceBinding>,
    duplicates: Vec<&'static str>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind contract `C` to `factory` at `level`
    pub fn bind<C, F>(self, level: ScopeLevel, description: impl Into<String>, factory: F) -> Self
    where
        C: ?Sized + 'static,
        F: Fn(&FactoryContext<'_>) -> Result<PresenterInstance> + Send + Sync + 'static,
    {
        self.bind_presenter(PresenterBinding {
            contract: ContractId::of::<C>(),
            level,
            description: description.into(),
            factory: Arc::new(factory),
        })
    }

    /// Declare scoped service `T` owned by scopes of `level`
    pub fn service<T, F>(self, level: ScopeLevel, description: impl Into<String>, factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&FactoryContext<'_>) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.bind_service(ServiceBinding {
            service: ContractId::of::<T>(),
            level,
            description: description.into(),
            factory: Arc::new(move |ctx: &FactoryContext<'_>| factory(ctx).map(ErasedArc::new)),
        })
    }

    /// Add one link-time presenter entry
    pub fn with_presenter_entry(self, entry: &'static PresenterBindingEntry) -> Self {
        let factory = entry.factory;
        self.bind_presenter(PresenterBinding {
            contract: (entry.contract)(),
            level: entry.level,
            description: entry.description.to_string(),
            factory: Arc::new(factory),
        })
    }

    /// Add one link-time service entry
    pub fn with_service_entry(self, entry: &'static ScopedServiceEntry) -> Self {
        let factory = entry.factory;
        self.bind_service(ServiceBinding {
            service: (entry.service)(),
            level: entry.level,
            description: entry.description.to_string(),
            factory: Arc::new(factory),
        })
    }

    /// Add every binding and service registered at link time
    pub fn with_link_time_bindings(self) -> Self {
        let builder = PRESENTER_BINDINGS
            .iter()
            .fold(self, |builder, entry| builder.with_presenter_entry(entry));
        SCOPED_SERVICES
            .iter()
            .fold(builder, |builder, entry| builder.with_service_entry(entry))
    }

    fn bind_presenter(mut self, binding: PresenterBinding) -> Self {
        let contract = binding.contract;
        if self.presenters.contains_key(&contract) {
            self.duplicates.push(contract.name());
        } else {
            debug!(contract = %contract, level = %binding.level, "presenter binding registered");
            self.presenters.insert(contract, binding);
        }
        self
    }

    fn bind_service(mut self, binding: ServiceBinding) -> Self {
        let service = binding.service;
        if self.services.contains_key(&service) {
            self.duplicates.push(service.name());
        } else {
            debug!(service = %service, level = %binding.level, "scoped service registered");
            self.services.insert(service, binding);
        }
        self
    }

    /// Finish the registry; fails on the first duplicate contract
    pub fn build(self) -> Result<PresenterRegistry> {
        if let Some(&contract) = self.duplicates.first() {
            return Err(Error::duplicate_binding(contract));
        }
        info!(
            presenters = self.presenters.len(),
            services = self.services.len(),
            "presenter registry built"
        );
        Ok(PresenterRegistry {
            presenters: self.presenters,
            services: self.services,
        })
    }
}
