//! Error types for path, query and pattern construction.

/// Errors raised while building paths, queries and key-value patterns.
///
/// All of them surface synchronously at construction or parse time. A query
/// that simply matches nothing is never an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Malformed input handed to a constructor or builder.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
    /// A percent-encoded key or value that does not decode to UTF-8.
    #[error("Invalid percent-encoding in '{input}'")]
    InvalidEncoding { input: String },
    /// Marker character other than '[' or '{'.
    #[error("Invalid marker '{0}', expected '[' or '{{'")]
    InvalidMarker(char),
}

impl TreeError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        TreeError::InvalidArgument {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TreeError::invalid_argument("Invalid path").to_string(),
            "Invalid argument: Invalid path"
        );
        assert_eq!(
            TreeError::InvalidMarker('x').to_string(),
            "Invalid marker 'x', expected '[' or '{'"
        );
    }
}
