//! Scope tree tests

use arch_domain::{Error, ScopeLevel};

use super::fixtures::{CounterPresenter, counter_tree};

#[test]
fn test_second_root_rejected_until_destroyed() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();

    let err = tree.create_root_scope().unwrap_err();
    assert!(matches!(err, Error::RootScopeExists { root: id } if id == root.id()));
    assert!(err.to_string().contains("App scope already active"));

    tree.destroy(&root);
    let again = tree.create_root_scope().unwrap();
    assert_ne!(again.id(), root.id());
}

#[test]
fn test_ensure_root_reuses_live_root() {
    let tree = counter_tree(ScopeLevel::Screen);
    let first = tree.ensure_root_scope().unwrap();
    let second = tree.ensure_root_scope().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_levels_and_parents() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    let row = tree.create_nested_scope(&screen).unwrap();

    assert_eq!(root.level(), ScopeLevel::Root);
    assert_eq!(screen.level(), ScopeLevel::Screen);
    assert_eq!(row.level(), ScopeLevel::Subscreen);
    assert_eq!(root.parent_id(), None);
    assert_eq!(screen.parent_id(), Some(root.id()));
    assert_eq!(row.parent_id(), Some(screen.id()));
    assert_eq!(tree.live_scope_count(), 3);
}

#[test]
fn test_nesting_beneath_subscreen_fails() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    let row = tree.create_nested_scope(&screen).unwrap();

    let err = tree.create_nested_scope(&row).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidNesting {
            level: ScopeLevel::Subscreen,
            child: ScopeLevel::Subscreen,
            ..
        }
    ));
}

#[test]
fn test_nesting_beneath_root_fails() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();

    let err = tree.create_nested_scope(&root).unwrap_err();
    assert!(matches!(err, Error::InvalidNesting { level: ScopeLevel::Root, .. }));
}

#[test]
fn test_child_scope_requires_root_parent() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();

    let err = tree.create_child_scope(&screen).unwrap_err();
    assert!(matches!(err, Error::InvalidNesting { child: ScopeLevel::Screen, .. }));
}

#[test]
fn test_screen_hosts_several_subscreens() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    let a = tree.create_nested_scope(&screen).unwrap();
    let b = tree.create_nested_scope(&screen).unwrap();

    assert_eq!(screen.child_ids(), vec![a.id(), b.id()]);
}

#[test]
fn test_destroy_removes_subtree() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    let row = tree.create_nested_scope(&screen).unwrap();

    let report = tree.destroy(&screen);

    assert_eq!(report.scopes, vec![row.id(), screen.id()]);
    assert!(screen.is_destroyed());
    assert!(row.is_destroyed());
    assert!(!root.is_destroyed());
    assert!(root.child_ids().is_empty());
    assert!(tree.scope(screen.id()).is_none());
    assert_eq!(tree.live_scope_count(), 1);
}

#[test]
fn test_destroy_twice_is_noop() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    tree.resolve::<dyn CounterPresenter>(&screen, None).unwrap();

    let first = tree.destroy(&screen);
    let second = tree.destroy(&screen);

    assert_eq!(first.cleared, 1);
    assert!(second.is_noop());
    assert_eq!(second.cleared, 0);
}

#[test]
fn test_create_beneath_destroyed_scope_fails() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    let screen = tree.create_child_scope(&root).unwrap();
    tree.destroy(&screen);

    let err = tree.create_nested_scope(&screen).unwrap_err();
    assert!(matches!(err, Error::ScopeDestroyed { .. }));
}

#[test]
fn test_root_destroy_clears_root_slot() {
    let tree = counter_tree(ScopeLevel::Screen);
    let root = tree.create_root_scope().unwrap();
    tree.create_child_scope(&root).unwrap();

    tree.destroy(&root);

    assert!(tree.root().is_none());
    assert_eq!(tree.live_scope_count(), 0);
}
