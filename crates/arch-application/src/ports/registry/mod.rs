//! Link-time Registries
//!
//! Feature crates describe what they contribute with `linkme` distributed
//! slices. Nothing here instantiates anything; the infrastructure layer
//! reads the slices once when it builds the binding registry and the scope
//! tree.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  feature crate:   #[linkme::distributed_slice(SLICE)]         │
//! │                   static ENTRY: Entry = Entry { .. }          │
//! │                          ↓                                    │
//! │  this crate:      pub static SLICE: [Entry] = [..]            │
//! │                          ↓                                    │
//! │  infrastructure:  SLICE.iter() → registry / scope factories   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registering a presenter binding
//!
//! ```ignore
//! use arch_application::ports::registry::{PresenterBindingEntry, PRESENTER_BINDINGS};
//!
//! #[linkme::distributed_slice(PRESENTER_BINDINGS)]
//! static COUNTER_BINDING: PresenterBindingEntry = PresenterBindingEntry {
//!     contract: ContractId::of::<dyn CounterPresenter>,
//!     level: ScopeLevel::Screen,
//!     description: "Counter starting at zero",
//!     factory: |ctx| CounterViewModel::build(ctx),
//! };
//! ```

pub mod presenters;
pub mod previews;
pub mod services;

pub use presenters::{
    PRESENTER_BINDINGS, PresenterBindingEntry, PresenterFactoryFn, list_presenter_bindings,
};
pub use previews::{PRESENTER_PREVIEWS, PresenterPreviewEntry, list_presenter_previews};
pub use services::{SCOPED_SERVICES, ScopedServiceEntry, ServiceFactoryFn, list_scoped_services};
