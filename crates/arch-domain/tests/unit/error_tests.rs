//! Unit tests for domain error types

use arch_domain::{Error, ScopeId, ScopeLevel};

#[test]
fn test_no_binding_names_contract_and_key() {
    let error = Error::no_binding("dyn Counter", Some("row-1"));
    let display = error.to_string();
    assert!(display.contains("dyn Counter"));
    assert!(display.contains("row-1"));
    assert!(error.is_configuration_error());
}

#[test]
fn test_duplicate_binding_error() {
    let error = Error::duplicate_binding("dyn Settings");
    match error {
        Error::DuplicateBinding { contract } => assert_eq!(contract, "dyn Settings"),
        _ => panic!("Expected DuplicateBinding error"),
    }
}

#[test]
fn test_invalid_nesting_mentions_level() {
    let parent = ScopeId::next();
    let error = Error::invalid_nesting(parent, ScopeLevel::Subscreen, ScopeLevel::Subscreen);
    let display = error.to_string();
    assert!(display.contains("subscreen scope inside subscreen"));
    assert!(display.contains(&parent.to_string()));
}

#[test]
fn test_teardown_error_is_not_configuration_error() {
    let error = Error::teardown("Counter[<default>]", "boom");
    assert!(!error.is_configuration_error());
    assert!(error.to_string().contains("boom"));
}

#[test]
fn test_presenter_error_keeps_source() {
    let io = std::io::Error::other("disk gone");
    let error = Error::presenter_with_source("load failed", io);
    let source = std::error::Error::source(&error).expect("source should be kept");
    assert!(source.to_string().contains("disk gone"));
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: Error = io.into();
    assert!(matches!(error, Error::Io { .. }));
}
