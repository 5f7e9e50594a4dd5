//! Presenter resolver tests

use std::sync::{Arc, Barrier};
use std::sync::atomic::{AtomicUsize, Ordering};

use arch_application::FactoryContext;
use arch_domain::{Error, ScopeLevel};
use arch_infrastructure::MockTable;
use arch_infrastructure::di::{PresenterRegistry, ScopeTree};

use super::fixtures::{
    CounterPresenter, CounterViewModel, JournalPresenter, counter_builder, counter_tree, tree_with,
};

#[test]
fn test_resolution_is_idempotent() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();

    let first = tree.resolve::<dyn CounterPresenter>(&screen, None).unwrap();
    first.increment();
    let second = tree.resolve::<dyn CounterPresenter>(&screen, None).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.value(), 1);
    assert_eq!(screen.live_count(), 1);
}

#[test]
fn test_keys_get_separate_instances() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();

    let item1 = tree.resolve::<dyn CounterPresenter>(&screen, Some("item1")).unwrap();
    let item2 = tree.resolve::<dyn CounterPresenter>(&screen, Some("item2")).unwrap();
    let default = tree.resolve::<dyn CounterPresenter>(&screen, None).unwrap();

    assert!(!Arc::ptr_eq(&item1, &item2));
    assert!(!Arc::ptr_eq(&item1, &default));
    assert_eq!(screen.live_count(), 3);
}

#[test]
fn test_sibling_scopes_are_isolated() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let s1 = tree.create_child_scope(&root).unwrap();
    let s2 = tree.create_child_scope(&root).unwrap();

    let a = tree.resolve::<dyn CounterPresenter>(&s1, None).unwrap();
    let b = tree.resolve::<dyn CounterPresenter>(&s2, None).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn test_root_binding_visible_from_subscreen() {
    let tree = counter_tree(ScopeLevel::Root);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    let row = tree.create_nested_scope(&screen).unwrap();

    let counter = tree.resolve::<dyn CounterPresenter>(&row, None).unwrap();

    counter.increment();
    assert_eq!(row.live_count(), 1);
    assert_eq!(screen.live_count(), 0);
    assert_eq!(root.live_count(), 0);
}

#[test]
fn test_subscreen_binding_invisible_from_parent() {
    let tree = counter_tree(ScopeLevel::Subscreen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    let row = tree.create_nested_scope(&screen).unwrap();

    assert!(tree.resolve::<dyn CounterPresenter>(&row, None).is_ok());
    let err = tree.resolve::<dyn CounterPresenter>(&screen, None).err().unwrap();
    assert!(matches!(err, Error::NoBinding { .. }));
}

#[test]
fn test_missing_binding_names_contract_and_key() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();

    let err = tree.resolve::<dyn JournalPresenter>(&screen, Some("row-3")).err().unwrap();

    assert!(matches!(&err, Error::NoBinding { key: Some(k), .. } if k == "row-3"));
    assert!(err.to_string().contains("JournalPresenter"));
    assert!(err.is_configuration_error());
}

#[test]
fn test_destroyed_scope_refuses_resolution() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    tree.destroy(&screen);

    let err = tree.resolve::<dyn CounterPresenter>(&screen, None).err().unwrap();
    assert!(matches!(err, Error::ScopeDestroyed { scope } if scope == screen.id()));
}

#[test]
fn test_factory_error_propagates_and_caches_nothing() {
    let registry = PresenterRegistry::builder()
        .bind::<dyn CounterPresenter, _>(ScopeLevel::Screen, "broken", |_ctx: &FactoryContext<'_>| {
            Err(Error::presenter("repository unavailable"))
        })
        .build()
        .unwrap();
    let tree = tree_with(registry);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();

    let err = tree.resolve::<dyn CounterPresenter>(&screen, None).err().unwrap();
    assert!(matches!(err, Error::Presenter { .. }));
    assert_eq!(screen.live_count(), 0);
}

#[test]
fn test_factory_producing_wrong_contract_is_rejected() {
    let registry = PresenterRegistry::builder()
        .bind::<dyn JournalPresenter, _>(ScopeLevel::Screen, "mislabelled", |_ctx: &FactoryContext<'_>| {
            Ok(CounterViewModel::instance())
        })
        .build()
        .unwrap();
    let tree = tree_with(registry);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();

    let err = tree.resolve::<dyn JournalPresenter>(&screen, None).err().unwrap();
    assert!(matches!(err, Error::ContractMismatch { .. }));
}

#[test]
fn test_factory_sees_scope_and_key() {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let record = Arc::clone(&seen);
    let registry = PresenterRegistry::builder()
        .bind::<dyn CounterPresenter, _>(ScopeLevel::Screen, "recording", move |ctx: &FactoryContext<'_>| {
            record
                .lock()
                .unwrap()
                .push((ctx.scope_id(), ctx.level(), ctx.key().map(str::to_owned)));
            Ok(CounterViewModel::instance())
        })
        .build()
        .unwrap();
    let tree = tree_with(registry);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    let row = tree.create_nested_scope(&screen).unwrap();

    tree.resolve::<dyn CounterPresenter>(&row, Some("row-1")).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![(row.id(), ScopeLevel::Subscreen, Some("row-1".to_string()))]
    );
}

#[test]
fn test_concurrent_resolution_builds_once() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let registry = PresenterRegistry::builder()
        .bind::<dyn CounterPresenter, _>(ScopeLevel::Screen, "counted", move |_ctx: &FactoryContext<'_>| {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(5));
            Ok(CounterViewModel::instance())
        })
        .build()
        .unwrap();
    let tree = tree_with(registry);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tree = tree.clone();
            let screen = screen.clone();
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                tree.resolve::<dyn CounterPresenter>(&screen, None).unwrap()
            })
        })
        .collect();
    let resolved: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert!(resolved.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[test]
fn test_mock_used_only_without_binding() {
    let mocks = Arc::new(MockTable::new());
    let stand_in: Arc<dyn CounterPresenter> = Arc::new(CounterViewModel::default());
    stand_in.increment();
    mocks.register::<dyn CounterPresenter>(None, Arc::clone(&stand_in));

    let bound = ScopeTree::builder(Arc::new(counter_builder(ScopeLevel::Screen).build().unwrap()))
        .with_mock_table(Arc::clone(&mocks))
        .build();
    let root = bound.create_root_scope().unwrap();
    let screen = bound.create_child_scope(&root).unwrap();
    let real = bound.resolve::<dyn CounterPresenter>(&screen, None).unwrap();
    assert!(!Arc::ptr_eq(&real, &stand_in));

    let unbound = ScopeTree::builder(Arc::new(PresenterRegistry::builder().build().unwrap()))
        .with_mock_table(Arc::clone(&mocks))
        .build();
    let root = unbound.create_root_scope().unwrap();
    let screen = unbound.create_child_scope(&root).unwrap();
    let resolved = unbound.resolve::<dyn CounterPresenter>(&screen, Some("any"));

    if cfg!(debug_assertions) {
        let resolved = resolved.unwrap();
        assert!(Arc::ptr_eq(&resolved, &stand_in));
        // stand-ins are not owned by the scope
        assert_eq!(screen.live_count(), 0);
        unbound.destroy(&screen);
        assert_eq!(stand_in.cleared_count(), 0);
    } else {
        assert!(matches!(resolved.err().unwrap(), Error::NoBinding { .. }));
    }
}

#[test]
fn test_mock_exact_key_beats_default_in_resolution() {
    let mocks = Arc::new(MockTable::new());
    let default: Arc<dyn CounterPresenter> = Arc::new(CounterViewModel::default());
    let specific: Arc<dyn CounterPresenter> = Arc::new(CounterViewModel::default());
    mocks.register::<dyn CounterPresenter>(None, Arc::clone(&default));
    mocks.register::<dyn CounterPresenter>(Some("specific"), Arc::clone(&specific));

    let tree = ScopeTree::builder(Arc::new(PresenterRegistry::builder().build().unwrap()))
        .with_mock_table(mocks)
        .build();
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();

    if cfg!(debug_assertions) {
        let exact = tree.resolve::<dyn CounterPresenter>(&screen, Some("specific")).unwrap();
        let other = tree.resolve::<dyn CounterPresenter>(&screen, Some("other")).unwrap();
        assert!(Arc::ptr_eq(&exact, &specific));
        assert!(Arc::ptr_eq(&other, &default));
    }
}

#[test]
fn test_mock_overrides_can_be_disabled() {
    let mocks = Arc::new(MockTable::new());
    let stand_in: Arc<dyn CounterPresenter> = Arc::new(CounterViewModel::default());
    mocks.register::<dyn CounterPresenter>(None, stand_in);

    let tree = ScopeTree::builder(Arc::new(PresenterRegistry::builder().build().unwrap()))
        .with_mock_table(mocks)
        .with_mock_overrides(false)
        .build();
    let root = tree.create_root_scope().unwrap();

    assert!(!tree.resolver().mocks_enabled());
    let err = tree.resolve::<dyn CounterPresenter>(&root, None).err().unwrap();
    assert!(matches!(err, Error::NoBinding { .. }));
}
