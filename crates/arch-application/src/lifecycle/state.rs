//! Reactive presenter state
//!
//! A thin wrapper over `tokio::sync::watch`. Observers hold a receiver and
//! always see the latest value. Writes go through the owning task scope's
//! gate and are dropped once that scope has been cancelled.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::lifecycle::task_scope::LifecycleGate;

/// Observable state of a presenter
pub struct PresenterState<T> {
    tx: Arc<watch::Sender<T>>,
    gate: Arc<LifecycleGate>,
}

impl<T> PresenterState<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Ungated cell, for stand-ins that never get torn down
    pub fn new(initial: T) -> Self {
        Self::gated(initial, Arc::new(LifecycleGate::new()))
    }

    pub(crate) fn gated(initial: T, gate: Arc<LifecycleGate>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx: Arc::new(tx),
            gate,
        }
    }

    /// Replace the value; returns `false` if the owner was torn down
    pub fn set(&self, value: T) -> bool {
        self.gate.with_open(|| {
            self.tx.send_replace(value);
        })
    }

    /// Modify the value in place; returns `false` if the owner was torn down
    pub fn update<F: FnOnce(&mut T)>(&self, f: F) -> bool {
        self.gate.with_open(|| self.tx.send_modify(f))
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Whether writes are still accepted
    pub fn is_live(&self) -> bool {
        self.gate.is_open()
    }
}

impl<T> Clone for PresenterState<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
            gate: Arc::clone(&self.gate),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PresenterState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterState")
            .field("value", &*self.tx.borrow())
            .field("live", &self.gate.is_open())
            .finish()
    }
}
