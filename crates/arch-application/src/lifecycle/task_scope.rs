//! Cancellable task scopes on the tokio runtime

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use arch_domain::{Error, Result};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use crate::lifecycle::state::PresenterState;

/// Open/closed flag shared by a task scope and its state cells
///
/// Emissions hold the read side; closing takes the write side, so it waits
/// for in-flight emissions and blocks later ones.
#[derive(Debug)]
pub(crate) struct LifecycleGate {
    open: RwLock<bool>,
}

impl LifecycleGate {
    pub(crate) fn new() -> Self {
        Self {
            open: RwLock::new(true),
        }
    }

    /// Run `f` if the gate is open; returns whether it ran
    pub(crate) fn with_open<F: FnOnce()>(&self, f: F) -> bool {
        let open = self.open.read().unwrap_or_else(PoisonError::into_inner);
        if *open {
            f();
        }
        *open
    }

    pub(crate) fn close(&self) -> bool {
        let mut open = self.open.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *open, false)
    }

    pub(crate) fn is_open(&self) -> bool {
        *self.open.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The runtime a scope tree hands to presenter factories
///
/// Every task scope derived from it is a child of one root cancellation
/// token and is tracked by one tree-wide tracker, so shutdown can cancel
/// everything and wait for it.
#[derive(Clone, Debug)]
pub struct TaskRuntime {
    handle: Handle,
    token: CancellationToken,
    tracker: TaskTracker,
}

impl TaskRuntime {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            token: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Capture the runtime the caller is running on
    pub fn current() -> Result<Self> {
        let handle = Handle::try_current()
            .map_err(|e| Error::no_runtime(format!("no tokio runtime entered: {e}")))?;
        Ok(Self::new(handle))
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// New task scope for one presenter
    pub fn scope(&self, label: impl Into<String>) -> ViewModelScope {
        ViewModelScope {
            label: label.into(),
            token: self.token.child_token(),
            tracker: self.tracker.clone(),
            handle: self.handle.clone(),
            gate: Arc::new(LifecycleGate::new()),
        }
    }

    /// Number of presenter tasks still running
    pub fn active_tasks(&self) -> usize {
        self.tracker.len()
    }

    /// Cancel every task scope derived from this runtime
    pub fn cancel_all(&self) {
        self.token.cancel();
    }

    /// Wait until all tracked tasks have finished, bounded by `grace`
    ///
    /// Returns `false` when the grace period elapsed first.
    pub async fn drain(&self, grace: Duration) -> bool {
        self.tracker.close();
        let finished = tokio::time::timeout(grace, self.tracker.wait())
            .await
            .is_ok();
        self.tracker.reopen();
        if !finished {
            warn!(
                remaining = self.tracker.len(),
                grace_ms = grace.as_millis() as u64,
                "presenter tasks still running after grace period"
            );
        }
        finished
    }
}

/// Background-work scope owned by one presenter
///
/// Tasks launched here stop at their next await point once the scope is
/// cancelled. The owning presenter cancels it from its teardown hook.
#[derive(Debug)]
pub struct ViewModelScope {
    label: String,
    token: CancellationToken,
    tracker: TaskTracker,
    handle: Handle,
    gate: Arc<LifecycleGate>,
}

impl ViewModelScope {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Spawn `fut` on the runtime; returns `false` if the scope is cancelled
    pub fn launch<F>(&self, fut: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if !self.is_active() {
            debug!(scope = %self.label, "launch after cancel ignored");
            return false;
        }
        let token = self.token.clone();
        self.tracker.spawn_on(
            async move {
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = fut => {}
                }
            },
            &self.handle,
        );
        true
    }

    /// Token that fires when this scope is cancelled
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// State cell gated by this scope
    pub fn state<T>(&self, initial: T) -> PresenterState<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        PresenterState::gated(initial, Arc::clone(&self.gate))
    }

    /// Close the state gate, then cancel every task; idempotent
    pub fn cancel(&self) {
        if self.gate.close() {
            debug!(scope = %self.label, "task scope cancelled");
        }
        self.token.cancel();
    }

    pub fn is_active(&self) -> bool {
        self.gate.is_open() && !self.token.is_cancelled()
    }
}
