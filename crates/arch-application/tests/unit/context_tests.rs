//! Tests for the factory context

use std::sync::Arc;

use arch_application::{FactoryContext, ServiceLocator, TaskRuntime};
use arch_domain::{ContractId, ErasedArc, Error, Result, ScopeId, ScopeLevel};

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct English;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

struct SingleService(ErasedArc);

impl ServiceLocator for SingleService {
    fn locate(&self, service: ContractId) -> Result<ErasedArc> {
        if service == self.0.type_id() {
            Ok(self.0.clone())
        } else {
            Err(Error::NoService {
                service: service.name(),
                scope: ScopeId::next(),
            })
        }
    }
}

fn locator() -> SingleService {
    let greeter: Arc<dyn Greeter> = Arc::new(English);
    SingleService(ErasedArc::new(greeter))
}

#[test]
fn test_service_lookup_recovers_trait_object() {
    let locator = locator();
    let scope = ScopeId::next();
    let ctx = FactoryContext::new(scope, ScopeLevel::Screen, Some("row-1"), &locator, None);

    let greeter = ctx.service::<dyn Greeter>().expect("service visible");
    assert_eq!(greeter.greet(), "hello");
    assert_eq!(ctx.scope_id(), scope);
    assert_eq!(ctx.level(), ScopeLevel::Screen);
    assert_eq!(ctx.key(), Some("row-1"));
}

#[test]
fn test_missing_service_is_reported() {
    let locator = locator();
    let ctx = FactoryContext::new(ScopeId::next(), ScopeLevel::Root, None, &locator, None);

    let err = ctx.service::<String>().unwrap_err();
    assert!(matches!(err, Error::NoService { .. }));
}

#[test]
fn test_task_scope_requires_runtime() {
    let locator = locator();
    let ctx = FactoryContext::new(ScopeId::next(), ScopeLevel::Screen, None, &locator, None);

    let err = ctx.task_scope("counter").unwrap_err();
    assert!(matches!(err, Error::NoRuntime { .. }));
}

#[tokio::test]
async fn test_task_scope_uses_supplied_runtime() {
    let locator = locator();
    let runtime = TaskRuntime::current().expect("inside tokio");
    let ctx = FactoryContext::new(
        ScopeId::next(),
        ScopeLevel::Screen,
        None,
        &locator,
        Some(&runtime),
    );

    let scope = ctx.task_scope("counter").expect("runtime present");
    assert_eq!(scope.label(), "counter");
    assert!(scope.is_active());
}
