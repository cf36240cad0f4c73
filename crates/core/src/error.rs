//! Error types and the conventions for swallowing host failures

/// Standard result type for loader operations
pub type LoaderResult<T> = std::result::Result<T, LoaderError>;

/// Failures raised by a [`Host`](crate::Host) or while reading options
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoaderError {
    #[error("Host unavailable: {message}")]
    HostUnavailable { message: String },

    #[error("DOM operation failed: {message}")]
    Dom { message: String },

    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },
}

impl LoaderError {
    /// Create a host unavailable error
    pub fn host_unavailable(message: impl Into<String>) -> Self {
        Self::HostUnavailable {
            message: message.into(),
        }
    }

    /// Create a DOM error
    pub fn dom(message: impl Into<String>) -> Self {
        Self::Dom {
            message: message.into(),
        }
    }

    /// Create an invalid options error
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for LoaderError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_options(err.to_string())
    }
}

/// Extension trait for host results whose failure must not interrupt the widget.
///
/// Once a loader exists, every mutator degrades to a no-op instead of
/// surfacing errors, so failed host calls are logged and dropped.
pub trait WarnOnError {
    /// Log the error (if any) under the given operation name and discard it
    fn or_warn(self, operation: &'static str);
}

impl<T> WarnOnError for LoaderResult<T> {
    fn or_warn(self, operation: &'static str) {
        if let Err(err) = self {
            tracing::warn!(%err, operation, "loader host operation failed");
        }
    }
}
