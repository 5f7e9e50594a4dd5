//! Presenter Preview Registry
//!
//! Stand-in presenters contributed by feature crates for debug and preview
//! hosts. They are copied into the mock override table only in debug builds
//! and never take part in scope teardown.

use arch_domain::{ContractId, ErasedArc};

/// Registry entry for a preview stand-in
pub struct PresenterPreviewEntry {
    /// Contract the stand-in implements
    pub contract: fn() -> ContractId,
    /// Discriminator; `None` registers the default stand-in
    pub key: Option<&'static str>,
    /// Human-readable description
    pub description: &'static str,
    /// Builds the shared stand-in; called once per install
    pub factory: fn() -> ErasedArc,
}

#[linkme::distributed_slice]
pub static PRESENTER_PREVIEWS: [PresenterPreviewEntry] = [..];

/// List all preview stand-ins registered at link time
pub fn list_presenter_previews() -> Vec<(ContractId, Option<&'static str>, &'static str)> {
    PRESENTER_PREVIEWS
        .iter()
        .map(|e| ((e.contract)(), e.key, e.description))
        .collect()
}
