//! Infrastructure layer constants
//!
//! Domain-level constants live in `arch_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "arch.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "arch";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "ARCH";

/// Separator between nested keys in environment variables
/// (`ARCH_SCOPES__TEARDOWN_GRACE_MS`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "ARCH_LOG";

/// Fallback file stem for the rolling log file
pub const DEFAULT_LOG_FILE_STEM: &str = "arch";

// ============================================================================
// SCOPE CONSTANTS
// ============================================================================

/// Time shutdown waits for cancelled presenter tasks to finish
pub const DEFAULT_TEARDOWN_GRACE_MS: u64 = 2_000;

/// Upper bound accepted for the teardown grace period
pub const MAX_TEARDOWN_GRACE_MS: u64 = 60_000;

// ============================================================================
// HOST CONSTANTS
// ============================================================================

/// Destination the host opens on start
pub const DEFAULT_START_DESTINATION: &str = "catalog";
