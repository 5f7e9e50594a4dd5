//! Scope identities and levels

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle of one scope node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(u64);

impl ScopeId {
    /// Allocate a fresh, process-unique identity
    pub fn next() -> Self {
        Self(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Level of a scope in the app → screen → sub-screen hierarchy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeLevel {
    /// Process-wide scope, one per tree
    Root,
    /// One per navigation destination
    Screen,
    /// Shorter-lived region of a screen (a row, a tab)
    Subscreen,
}

impl ScopeLevel {
    /// Level of the scope created by nesting beneath `self`, if allowed
    pub fn nested(self) -> Option<Self> {
        match self {
            Self::Screen => Some(Self::Subscreen),
            Self::Root | Self::Subscreen => None,
        }
    }

    /// Distance from the root
    pub fn depth(self) -> usize {
        match self {
            Self::Root => 0,
            Self::Screen => 1,
            Self::Subscreen => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Screen => "screen",
            Self::Subscreen => "subscreen",
        }
    }
}

impl fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
