//! Error types for configuration resolution.
//!
//! Almost everything in the resolver is fail-soft: unreadable or malformed
//! files are skipped and odd values are coerced. The variants here are the
//! cases that must reach the caller.

use crate::config::Field;

/// Errors that abort a resolution call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A `${NAME}` placeholder referenced an environment variable that is not set.
    #[error("{field}: environment variable {variable} referenced by ${{{variable}}} is not set")]
    MissingInterpolationVariable { field: Field, variable: String },

    /// I/O error outside the fail-soft file layer (e.g. reading a file the CLI was pointed at).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn missing_variable(field: Field, variable: impl Into<String>) -> Self {
        Self::MissingInterpolationVariable {
            field,
            variable: variable.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variable_message() {
        let err = ConfigError::missing_variable(Field::BaseUrl, "MY_URL");
        assert_eq!(
            err.to_string(),
            "baseUrl: environment variable MY_URL referenced by ${MY_URL} is not set"
        );
    }
}
