//! Teardown bookkeeping
//!
//! Destroying a scope never stops at the first failing hook. Every error
//! and every panic is recorded here and the rest of the subtree is still
//! torn down.

use std::any::Any;
use std::fmt;

use arch_domain::{Error, ScopeId};

/// One teardown hook that did not finish cleanly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownFailure {
    /// Scope that owned the instance
    pub scope: ScopeId,
    /// Presenter key of the instance
    pub target: String,
    /// Error message or panic payload
    pub message: String,
    /// Whether the hook panicked rather than returning an error
    pub panicked: bool,
}

impl TeardownFailure {
    pub(crate) fn from_error(scope: ScopeId, target: String, error: &Error) -> Self {
        Self {
            scope,
            target,
            message: error.to_string(),
            panicked: false,
        }
    }

    pub(crate) fn from_panic(scope: ScopeId, target: String, payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self {
            scope,
            target,
            message,
            panicked: true,
        }
    }

    /// The failure as a domain error
    pub fn to_error(&self) -> Error {
        Error::teardown(&self.target, &self.message)
    }
}

impl fmt::Display for TeardownFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.panicked { "panicked" } else { "failed" };
        write!(f, "{} in scope {} {kind}: {}", self.target, self.scope, self.message)
    }
}

/// Outcome of destroying one scope subtree
#[derive(Debug, Default, Clone)]
pub struct TeardownReport {
    /// Scopes destroyed, children before parents
    pub scopes: Vec<ScopeId>,
    /// Number of teardown hooks run
    pub cleared: usize,
    /// Hooks that errored or panicked
    pub failures: Vec<TeardownFailure>,
}

impl TeardownReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether nothing was destroyed (already destroyed or unknown scope)
    pub fn is_noop(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn merge(&mut self, other: TeardownReport) {
        self.scopes.extend(other.scopes);
        self.cleared += other.cleared;
        self.failures.extend(other.failures);
    }

    /// Failures converted to domain errors
    pub fn errors(&self) -> Vec<Error> {
        self.failures.iter().map(TeardownFailure::to_error).collect()
    }
}
