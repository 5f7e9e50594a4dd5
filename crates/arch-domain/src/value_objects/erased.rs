//! Type-erased shared pointers
//!
//! Presenter contracts and scoped services are usually trait objects, which
//! `Arc<dyn Any>::downcast` cannot recover. [`ErasedArc`] wraps the whole
//! `Arc<T>` instead, so `T` may be unsized and is recovered by cloning the
//! inner `Arc`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::value_objects::ContractId;

/// A shared `Arc<T>` with `T` erased
pub struct ErasedArc {
    type_id: ContractId,
    value: Arc<dyn Any + Send + Sync>,
}

impl ErasedArc {
    pub fn new<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            type_id: ContractId::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// Identity of the erased `T`
    pub fn type_id(&self) -> ContractId {
        self.type_id
    }

    /// Recover `Arc<T>` if `T` is the erased type
    pub fn downcast<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.value.is::<Arc<T>>()
    }
}

impl Clone for ErasedArc {
    fn clone(&self) -> Self {
        Self {
            type_id: self.type_id,
            value: Arc::clone(&self.value),
        }
    }
}

impl fmt::Debug for ErasedArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErasedArc").field(&self.type_id.name()).finish()
    }
}
