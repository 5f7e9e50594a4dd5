//! Debug mock override table
//!
//! Stand-in presenters keyed by (contract, optional discriminator). The
//! resolver consults the table only in debug builds and only after the
//! scope chain had no factory. Stand-ins are shared for the life of the
//! process and are never torn down.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use arch_application::ports::registry::PRESENTER_PREVIEWS;
use arch_domain::{ContractId, ErasedArc, PresenterKey};
use indexmap::IndexMap;
use tracing::debug;

static GLOBAL_MOCKS: LazyLock<Arc<MockTable>> = LazyLock::new(|| Arc::new(MockTable::new()));

/// Insertion-ordered (contract, key) → stand-in table
///
/// Writes are expected while feature modules load; afterwards the table is
/// read-mostly.
#[derive(Debug, Default)]
pub struct MockTable {
    entries: RwLock<IndexMap<PresenterKey, ErasedArc>>,
}

impl MockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide table used by default-built scope trees
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_MOCKS)
    }

    /// Register a stand-in for contract `C`
    ///
    /// Registering the same (contract, key) again replaces the stand-in and
    /// keeps its original position.
    pub fn register<C: ?Sized + Send + Sync + 'static>(&self, key: Option<&str>, instance: Arc<C>) {
        self.register_erased(PresenterKey::of::<C>(key), ErasedArc::new(instance));
    }

    pub fn register_erased(&self, key: PresenterKey, instance: ErasedArc) {
        debug!(mock = %key, "mock override registered");
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, instance);
    }

    /// Exact (contract, key) match, else the contract's default stand-in
    pub fn lookup_erased(&self, contract: ContractId, key: Option<&str>) -> Option<ErasedArc> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let exact = PresenterKey::new(contract, key);
        entries
            .get(&exact)
            .or_else(|| entries.get(&exact.default_key()))
            .cloned()
    }

    /// Typed lookup with the same fallback as [`Self::lookup_erased`]
    pub fn lookup<C: ?Sized + 'static>(&self, key: Option<&str>) -> Option<Arc<C>> {
        self.lookup_erased(ContractId::of::<C>(), key)?.downcast::<C>()
    }

    /// Registered keys in insertion order
    pub fn entries(&self) -> Vec<PresenterKey> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy link-time preview stand-ins into the table
    ///
    /// Keys already present are left alone, so explicit registrations win
    /// and repeated installs are no-ops. Release builds install nothing.
    /// Returns the number of entries added.
    pub fn install_previews(&self) -> usize {
        if !cfg!(debug_assertions) {
            return 0;
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut added = 0;
        for preview in PRESENTER_PREVIEWS {
            let key = PresenterKey::new((preview.contract)(), preview.key);
            if entries.contains_key(&key) {
                continue;
            }
            debug!(mock = %key, description = preview.description, "preview installed");
            entries.insert(key, (preview.factory)());
            added += 1;
        }
        added
    }
}
