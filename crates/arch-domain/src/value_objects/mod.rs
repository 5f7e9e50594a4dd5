//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`ContractId`] | Runtime identity of a presenter contract |
//! | [`PresenterKey`] | Contract plus optional discriminator |
//! | [`ScopeId`] | Opaque handle of one scope node |
//! | [`ScopeLevel`] | Root, screen or sub-screen |
//! | [`ErasedArc`] | Type-erased `Arc<T>` for trait-object storage |

/// Contract identities and presenter keys
pub mod contract;
/// Type-erased shared pointers
pub mod erased;
/// Scope identities and levels
pub mod scope;

pub use contract::{ContractId, PresenterKey};
pub use erased::ErasedArc;
pub use scope::{ScopeId, ScopeLevel};
