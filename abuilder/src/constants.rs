//! Reserved names of the dispatch engine
//!
//! These are the only names the engine treats specially. Everything else is decoded
//! from the shape of the called segment or looked up in the helper tree.

// ============================================================================
// METHOD NAME CONSTANTS
// ============================================================================

/// Segment that ends a chain and yields the record
pub const TERMINAL_METHOD: &str = "build";

/// Prefix shared by every generated mutator (`withName`, `with_Age`, ...)
pub const MUTATOR_PREFIX: &str = "with";

/// Prefix whose remainder is taken verbatim as the field name (`with_Age` -> `Age`)
pub const VERBATIM_MUTATOR_PREFIX: &str = "with_";

// ============================================================================
// PATH CONSTANTS
// ============================================================================

/// Separator used when rendering and parsing dotted paths
pub const PATH_SEPARATOR: char = '.';

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable holding log filter directives for [`crate::tracing_support`]
pub const LOG_ENV_VAR: &str = "ABUILDER_LOG";

/// Directives used when neither the caller nor the environment supplies any
pub const DEFAULT_LOG_DIRECTIVES: &str = "abuilder=warn";
