//! Domain layer constants
//!
//! Values that describe the shape of the scope hierarchy. Runtime tunables
//! (teardown grace periods, logging) live in the infrastructure config.

/// Number of sub-screen levels allowed beneath a screen scope
pub const MAX_NESTING_DEPTH: usize = 1;

/// Label used when printing a presenter key without a discriminator
pub const DEFAULT_KEY_LABEL: &str = "<default>";

/// Prefix rustc adds to trait-object type names
pub const DYN_TYPE_PREFIX: &str = "dyn ";
