//! Scoped service tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arch_application::FactoryContext;
use arch_domain::{Error, ScopeLevel};
use arch_infrastructure::di::PresenterRegistry;

use super::fixtures::{CounterPresenter, CounterViewModel, tree_with};

/// Screen-wide message sink
struct Bus {
    created_in: arch_domain::ScopeId,
}

fn bus_registry(created: Arc<AtomicUsize>) -> PresenterRegistry {
    PresenterRegistry::builder()
        .service::<Bus, _>(ScopeLevel::Screen, "screen bus", move |ctx: &FactoryContext<'_>| {
            created.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Bus {
                created_in: ctx.scope_id(),
            }))
        })
        .build()
        .unwrap()
}

#[test]
fn test_screen_service_shared_with_subscreens() {
    let created = Arc::new(AtomicUsize::new(0));
    let tree = tree_with(bus_registry(Arc::clone(&created)));
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    let row_a = tree.create_nested_scope(&screen).unwrap();
    let row_b = tree.create_nested_scope(&screen).unwrap();

    let from_a = tree.service::<Bus>(&row_a).unwrap();
    let from_b = tree.service::<Bus>(&row_b).unwrap();
    let from_screen = tree.service::<Bus>(&screen).unwrap();

    assert!(Arc::ptr_eq(&from_a, &from_b));
    assert!(Arc::ptr_eq(&from_a, &from_screen));
    assert_eq!(from_a.created_in, screen.id());
    assert_eq!(created.load(Ordering::SeqCst), 1);
}

#[test]
fn test_sibling_screens_get_own_service() {
    let created = Arc::new(AtomicUsize::new(0));
    let tree = tree_with(bus_registry(Arc::clone(&created)));
    let root = tree.create_root_scope().unwrap();
    let s1 = tree.create_child_scope(&root).unwrap();
    let s2 = tree.create_child_scope(&root).unwrap();

    let a = tree.service::<Bus>(&s1).unwrap();
    let b = tree.service::<Bus>(&s2).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(created.load(Ordering::SeqCst), 2);
}

#[test]
fn test_screen_service_invisible_from_root() {
    let tree = tree_with(bus_registry(Arc::new(AtomicUsize::new(0))));
    let root = tree.create_root_scope().unwrap();

    let err = tree.service::<Bus>(&root).err().unwrap();
    assert!(matches!(err, Error::NoService { scope, .. } if scope == root.id()));
}

#[test]
fn test_presenter_factory_reads_service() {
    let registry = PresenterRegistry::builder()
        .service::<Bus, _>(ScopeLevel::Screen, "screen bus", |ctx: &FactoryContext<'_>| {
            Ok(Arc::new(Bus {
                created_in: ctx.scope_id(),
            }))
        })
        .bind::<dyn CounterPresenter, _>(ScopeLevel::Subscreen, "row counter", |ctx: &FactoryContext<'_>| {
            let bus = ctx.service::<Bus>()?;
            assert_ne!(bus.created_in, ctx.scope_id());
            Ok(CounterViewModel::instance())
        })
        .build()
        .unwrap();
    let tree = tree_with(registry);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    let row = tree.create_nested_scope(&screen).unwrap();

    tree.resolve::<dyn CounterPresenter>(&row, None).unwrap();
    assert_eq!(row.live_count(), 1);
}

#[test]
fn test_service_gone_after_destroy() {
    let tree = tree_with(bus_registry(Arc::new(AtomicUsize::new(0))));
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    tree.service::<Bus>(&screen).unwrap();

    tree.destroy(&screen);

    let err = tree.service::<Bus>(&screen).err().unwrap();
    assert!(matches!(err, Error::ScopeDestroyed { .. }));
}
