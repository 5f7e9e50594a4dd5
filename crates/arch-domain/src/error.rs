//! Error handling types

use thiserror::Error;

use crate::value_objects::{ScopeId, ScopeLevel};

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the presenter runtime
#[derive(Error, Debug)]
pub enum Error {
    /// No factory in the scope chain and no stand-in for the requested presenter
    #[error("No presenter binding for {contract} with key={key:?}")]
    NoBinding {
        /// Type name of the requested contract
        contract: &'static str,
        /// Discriminator the caller asked for
        key: Option<String>,
    },

    /// Two feature modules registered the same contract
    #[error("Duplicate presenter binding for {contract}")]
    DuplicateBinding {
        /// Type name of the contract registered twice
        contract: &'static str,
    },

    /// A scope was requested beneath a parent that cannot host that level
    #[error("Cannot create a {child} scope inside {level} scope {parent}")]
    InvalidNesting {
        /// Scope the caller tried to nest beneath
        parent: ScopeId,
        /// Level of that scope
        level: ScopeLevel,
        /// Level that was requested
        child: ScopeLevel,
    },

    /// The tree already has a live root scope
    #[error("App scope already active: {root}")]
    RootScopeExists {
        /// Identity of the live root
        root: ScopeId,
    },

    /// The scope was torn down and can no longer resolve or host anything
    #[error("Scope {scope} is destroyed")]
    ScopeDestroyed {
        /// Identity of the destroyed scope
        scope: ScopeId,
    },

    /// A binding produced an instance that does not carry the requested contract
    #[error("Binding for {contract} produced {actual}")]
    ContractMismatch {
        /// Type name of the requested contract
        contract: &'static str,
        /// Type name carried by the produced instance
        actual: &'static str,
    },

    /// A scoped service was requested but no visible scope declares it
    #[error("No scoped service {service} visible from scope {scope}")]
    NoService {
        /// Type name of the requested service
        service: &'static str,
        /// Scope the lookup started from
        scope: ScopeId,
    },

    /// A presenter teardown hook failed
    #[error("Teardown failed for {target}: {message}")]
    Teardown {
        /// Presenter key or service that failed
        target: String,
        /// Failure description
        message: String,
    },

    /// Background work was requested without an async runtime
    #[error("No async runtime available: {message}")]
    NoRuntime {
        /// Description of what needed the runtime
        message: String,
    },

    /// A presenter factory could not build its instance
    #[error("Presenter error: {message}")]
    Presenter {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a missing binding error
    pub fn no_binding(contract: &'static str, key: Option<&str>) -> Self {
        Self::NoBinding {
            contract,
            key: key.map(str::to_owned),
        }
    }

    /// Create a duplicate binding error
    pub fn duplicate_binding(contract: &'static str) -> Self {
        Self::DuplicateBinding { contract }
    }

    /// Create an invalid nesting error
    pub fn invalid_nesting(parent: ScopeId, level: ScopeLevel, child: ScopeLevel) -> Self {
        Self::InvalidNesting {
            parent,
            level,
            child,
        }
    }

    /// Create a destroyed scope error
    pub fn scope_destroyed(scope: ScopeId) -> Self {
        Self::ScopeDestroyed { scope }
    }
}

// Presenter error creation methods
impl Error {
    /// Create a presenter error
    pub fn presenter<S: Into<String>>(message: S) -> Self {
        Self::Presenter {
            message: message.into(),
            source: None,
        }
    }

    /// Create a presenter error with source
    pub fn presenter_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Presenter {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a teardown error
    pub fn teardown<T: Into<String>, S: Into<String>>(target: T, message: S) -> Self {
        Self::Teardown {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a missing runtime error
    pub fn no_runtime<S: Into<String>>(message: S) -> Self {
        Self::NoRuntime {
            message: message.into(),
        }
    }
}

// Configuration and internal error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error is a wiring mistake that must never be swallowed
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::NoBinding { .. }
                | Self::DuplicateBinding { .. }
                | Self::InvalidNesting { .. }
                | Self::ContractMismatch { .. }
                | Self::NoService { .. }
                | Self::Configuration { .. }
        )
    }
}
