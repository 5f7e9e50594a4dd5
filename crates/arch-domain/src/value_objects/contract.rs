//! Presenter contract identities
//!
//! Contracts are trait-object types such as `dyn CounterPresenter`. Their
//! identity is the compiler's `TypeId`, so lookups never go through
//! reflection or string comparison.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::constants::{DEFAULT_KEY_LABEL, DYN_TYPE_PREFIX};

/// Runtime identity of a presenter contract
#[derive(Clone, Copy)]
pub struct ContractId {
    type_id: TypeId,
    name: &'static str,
}

impl ContractId {
    /// Identity of the contract type `C` (usually `dyn SomePresenter`)
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// Underlying type identity
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name, as reported by the compiler
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment without the `dyn ` prefix, for log lines
    pub fn short_name(&self) -> &'static str {
        let name = self.name.strip_prefix(DYN_TYPE_PREFIX).unwrap_or(self.name);
        let path = name.split('<').next().unwrap_or(name);
        match path.rfind("::") {
            Some(idx) => &name[idx + 2..],
            None => name,
        }
    }

    /// Whether this identity describes `C`
    pub fn is<C: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<C>()
    }
}

impl PartialEq for ContractId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ContractId {}

impl Hash for ContractId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContractId").field(&self.name).finish()
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Contract plus optional discriminator
///
/// Within one scope at most one live presenter exists per key. Two keys with
/// the same contract and different discriminators (one card per row, say)
/// coexist.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PresenterKey {
    contract: ContractId,
    key: Option<String>,
}

impl PresenterKey {
    /// Build a key from an existing contract identity
    pub fn new(contract: ContractId, key: Option<&str>) -> Self {
        Self {
            contract,
            key: key.map(str::to_owned),
        }
    }

    /// Build a key for contract `C`
    pub fn of<C: ?Sized + 'static>(key: Option<&str>) -> Self {
        Self::new(ContractId::of::<C>(), key)
    }

    pub fn contract(&self) -> ContractId {
        self.contract
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The same contract with the discriminator dropped
    pub fn default_key(&self) -> Self {
        Self {
            contract: self.contract,
            key: None,
        }
    }
}

impl fmt::Display for PresenterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]",
            self.contract,
            self.key.as_deref().unwrap_or(DEFAULT_KEY_LABEL)
        )
    }
}
