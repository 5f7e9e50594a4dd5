//! Presenter registry tests

use arch_application::FactoryContext;
use arch_domain::{ContractId, Error, ScopeLevel};
use arch_infrastructure::di::PresenterRegistry;

use super::fixtures::{CounterPresenter, CounterViewModel, JournalPresenter, counter_builder};

#[test]
fn test_lookup_returns_registered_binding() {
    let registry = counter_builder(ScopeLevel::Screen).build().unwrap();

    let binding = registry
        .lookup(ContractId::of::<dyn CounterPresenter>())
        .expect("counter bound");
    assert_eq!(binding.level(), ScopeLevel::Screen);
    assert_eq!(binding.description(), "Counter starting at zero");
    assert!(registry.lookup(ContractId::of::<dyn JournalPresenter>()).is_none());
}

#[test]
fn test_duplicate_binding_fails_fast() {
    let err = counter_builder(ScopeLevel::Screen)
        .bind::<dyn CounterPresenter, _>(
            ScopeLevel::Root,
            "second counter",
            |_ctx: &FactoryContext<'_>| Ok(CounterViewModel::instance()),
        )
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateBinding { .. }));
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("CounterPresenter"));
}

#[test]
fn test_duplicate_service_fails_fast() {
    let err = PresenterRegistry::builder()
        .service::<String, _>(ScopeLevel::Screen, "bus", |_ctx: &FactoryContext<'_>| {
            Ok(std::sync::Arc::new("a".to_string()))
        })
        .service::<String, _>(ScopeLevel::Root, "bus again", |_ctx: &FactoryContext<'_>| {
            Ok(std::sync::Arc::new("b".to_string()))
        })
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateBinding { .. }));
}

#[test]
fn test_presenters_for_filters_by_level() {
    let registry = counter_builder(ScopeLevel::Root).build().unwrap();

    assert_eq!(registry.presenters_for(ScopeLevel::Root).count(), 1);
    assert_eq!(registry.presenters_for(ScopeLevel::Screen).count(), 0);
    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
}

#[test]
fn test_list_preserves_registration_order() {
    let registry = PresenterRegistry::builder()
        .bind::<dyn JournalPresenter, _>(
            ScopeLevel::Subscreen,
            "journal",
            |_ctx: &FactoryContext<'_>| Err(arch_domain::Error::internal("unused")),
        )
        .bind::<dyn CounterPresenter, _>(
            ScopeLevel::Screen,
            "counter",
            |_ctx: &FactoryContext<'_>| Ok(CounterViewModel::instance()),
        )
        .build()
        .unwrap();

    let descriptions: Vec<&str> = registry.list().into_iter().map(|(_, _, d)| d).collect();
    assert_eq!(descriptions, vec!["journal", "counter"]);
}

#[test]
fn test_empty_link_time_registry_builds() {
    // no feature crate is linked into this test binary
    let registry = PresenterRegistry::from_link_time().unwrap();
    assert!(registry.is_empty());
}
