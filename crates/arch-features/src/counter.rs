//! Counter presenter
//!
//! The smallest presenter there is: one number, one command, an optional
//! starting value passed through `init_once`.

use std::sync::Arc;

use arch_application::ports::registry::{PRESENTER_BINDINGS, PresenterBindingEntry};
use arch_application::{FactoryContext, PresenterState, ViewModelScope};
use arch_domain::{
    ContractId, OnceParam, ParamInit, Presenter, PresenterInstance, Result, ScopeLevel,
};
use tokio::sync::watch;

pub trait CounterPresenter: Presenter + ParamInit<i64> {
    fn state(&self) -> watch::Receiver<i64>;
    fn on_increment(&self);
}

pub struct CounterViewModel {
    start: OnceParam<i64>,
    scope: ViewModelScope,
    value: PresenterState<i64>,
}

impl CounterViewModel {
    pub fn build(ctx: &FactoryContext<'_>) -> Result<PresenterInstance> {
        let scope = ctx.task_scope("counter")?;
        let vm = Arc::new(Self {
            start: OnceParam::new(),
            value: scope.state(0),
            scope,
        });
        Ok(PresenterInstance::new::<dyn CounterPresenter>(vm.clone(), vm))
    }
}

impl CounterPresenter for CounterViewModel {
    fn state(&self) -> watch::Receiver<i64> {
        self.value.subscribe()
    }

    fn on_increment(&self) {
        self.value.update(|v| *v += 1);
    }
}

impl ParamInit<i64> for CounterViewModel {
    fn init_once(&self, params: Option<i64>) {
        if let Some(&start) = self.start.offer(params) {
            self.value.set(start);
        }
    }
}

impl Presenter for CounterViewModel {
    fn on_cleared(&self) -> Result<()> {
        self.scope.cancel();
        Ok(())
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(PRESENTER_BINDINGS)]
static COUNTER_BINDING: PresenterBindingEntry = PresenterBindingEntry {
    contract: ContractId::of::<dyn CounterPresenter>,
    level: ScopeLevel::Screen,
    description: "Counter starting at zero",
    factory: CounterViewModel::build,
};
