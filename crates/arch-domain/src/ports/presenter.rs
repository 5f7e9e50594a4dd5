//! Presenter contracts
//!
//! A presenter is the controller behind one UI region: it exposes reactive
//! state and command methods. Every concrete presenter implements
//! [`Presenter`] (lifecycle) and [`ParamInit`] (one-time parameters), and a
//! feature-specific contract trait on top of both.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::{Error, Result};
use crate::value_objects::{ContractId, ErasedArc};

/// Lifecycle of a presenter instance owned by a scope
pub trait Presenter: Send + Sync + 'static {
    /// Teardown hook, run exactly once when the owning scope is destroyed.
    ///
    /// Implementations cancel their background work here. An error does not
    /// stop the rest of the scope from being torn down.
    fn on_cleared(&self) -> Result<()> {
        Ok(())
    }
}

/// One-time parameter initialization
///
/// The first present value is accepted for the lifetime of the instance;
/// absent values and every later value are ignored. Callers may invoke this
/// on every render pass.
pub trait ParamInit<P> {
    fn init_once(&self, params: Option<P>);
}

/// Cell implementing the [`ParamInit`] acceptance law
pub struct OnceParam<P> {
    value: OnceLock<P>,
}

impl<P> OnceParam<P> {
    pub fn new() -> Self {
        Self {
            value: OnceLock::new(),
        }
    }

    /// Offer a candidate; returns the value if this call accepted it
    pub fn offer(&self, params: Option<P>) -> Option<&P> {
        let candidate = params?;
        let mut accepted = false;
        let value = self.value.get_or_init(|| {
            accepted = true;
            candidate
        });
        accepted.then_some(value)
    }

    pub fn get(&self) -> Option<&P> {
        self.value.get()
    }

    pub fn is_set(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<P> Default for OnceParam<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: fmt::Debug> fmt::Debug for OnceParam<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceParam")
            .field("value", &self.value.get())
            .finish()
    }
}

/// A freshly built presenter: its contract view plus its lifecycle view
///
/// Both views point at the same object. The contract view is handed to
/// callers; the lifecycle view is what the owning scope tears down.
#[derive(Clone)]
pub struct PresenterInstance {
    contract: ErasedArc,
    lifecycle: Arc<dyn Presenter>,
}

impl PresenterInstance {
    /// Wrap a presenter under contract `C`
    ///
    /// ```ignore
    /// let vm = Arc::new(CounterViewModel::new());
    /// PresenterInstance::new::<dyn CounterPresenter>(vm.clone(), vm)
    /// ```
    pub fn new<C: ?Sized + Send + Sync + 'static>(
        contract: Arc<C>,
        lifecycle: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            contract: ErasedArc::new(contract),
            lifecycle,
        }
    }

    /// Contract the instance was built for
    pub fn contract_id(&self) -> ContractId {
        self.contract.type_id()
    }

    /// Recover the contract view
    pub fn contract<C: ?Sized + 'static>(&self) -> Result<Arc<C>> {
        self.contract
            .downcast::<C>()
            .ok_or_else(|| Error::ContractMismatch {
                contract: ContractId::of::<C>().name(),
                actual: self.contract.type_id().name(),
            })
    }

    pub fn lifecycle(&self) -> &Arc<dyn Presenter> {
        &self.lifecycle
    }

    /// Whether both handles refer to the same presenter object
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.lifecycle), Arc::as_ptr(&other.lifecycle))
    }
}

impl fmt::Debug for PresenterInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterInstance")
            .field("contract", &self.contract.type_id())
            .finish()
    }
}
