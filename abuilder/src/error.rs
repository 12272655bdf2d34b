use thiserror::Error;

// Error message prefixes
const MSG_CANNOT_PREFIX: &str = "Cannot";
const MSG_INVALID_PREFIX: &str = "Invalid";
const MSG_MISSING_PREFIX: &str = "Missing";

/// Result type for the `abuilder` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Errors raised by the record primitives and the facades
///
/// The dispatch engine itself never surfaces these to callers: a failed write turns into the
/// unrecognized no-op. They are visible from the deep-path primitives, the typed conversions
/// and facade construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A write targets an empty field name; carries the target path
    #[error("Empty field name at '{0}'")]
    EmptyFieldName(String),

    /// An array segment is past the end of the array
    #[error("Index {index} out of bounds for array of length {len} at '{path}'")]
    IndexOutOfBounds {
        /// Path of the array
        path:  String,
        /// Requested index
        index: usize,
        /// Current array length
        len:   usize,
    },

    /// A path segment cannot address the value it is applied to
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// An intermediate container on the way to the written field does not exist
    #[error("Missing container: {0}")]
    MissingContainer(String),

    /// The helper tree uses a name the engine reserves
    #[error("Reserved helper name: {0}")]
    ReservedHelperName(String),

    /// Conversion between a typed value and the record failed
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Log filter directives are invalid or a subscriber is already installed
    #[error("Tracing setup failed: {0}")]
    Tracing(String),
}

impl Error {
    // Builder methods for common patterns

    /// Create an "Invalid X" path error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidPath(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create a "Missing X" container error
    pub fn missing(what: &str, path: impl std::fmt::Display) -> Self {
        Self::MissingContainer(format!("{MSG_MISSING_PREFIX} {what} at '{path}'"))
    }

    /// Create a "Cannot X" serialization error
    pub fn cannot(action: &str, reason: impl std::fmt::Display) -> Self {
        Self::Serialization(format!("{MSG_CANNOT_PREFIX} {action}: {reason}"))
    }

    /// Create error for a helper entry shadowing a reserved name
    pub fn reserved(name: &str) -> Self {
        Self::ReservedHelperName(format!(
            "{MSG_CANNOT_PREFIX} override '{name}' in helper functions"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_prefixes() {
        assert_eq!(
            Error::invalid("array index", "'x'").to_string(),
            "Invalid path: Invalid array index: 'x'"
        );
        assert_eq!(
            Error::missing("object", "address.street").to_string(),
            "Missing container: Missing object at 'address.street'"
        );
        assert_eq!(
            Error::reserved("build").to_string(),
            "Reserved helper name: Cannot override 'build' in helper functions"
        );
    }
}
