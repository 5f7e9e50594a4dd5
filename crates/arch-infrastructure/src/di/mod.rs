//! Scope runtime
//!
//! Hand-built replacement for a generated DI graph: a registry of
//! contract → factory maps, a tree of scopes that own the presenters built
//! from them, and a resolver that walks the tree.
//!
//! ```text
//! PresenterRegistry ──seeds──→ ScopeTree (root → screen → subscreen)
//!                                   ↑
//!        ScopeContext ──resolve──→ PresenterResolver ──miss──→ MockTable
//! ```

pub mod bootstrap;
pub mod context;
pub mod mocks;
pub mod registry;
pub mod resolver;
pub mod scope;
pub mod teardown;
pub mod tree;

pub use bootstrap::{AppContainer, init_app};
pub use context::{ScopeContext, remember_presenter};
pub use mocks::MockTable;
pub use registry::{
    PresenterBinding, PresenterFactory, PresenterRegistry, RegistryBuilder, ServiceBinding,
    ServiceFactory,
};
pub use resolver::PresenterResolver;
pub use scope::ScopeHandle;
pub use teardown::{TeardownFailure, TeardownReport};
pub use tree::{ScopeTree, ScopeTreeBuilder};
