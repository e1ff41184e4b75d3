use thiserror::Error;

/// Result type alias for router operations
pub type Result<T> = std::result::Result<T, RouterError>;

/// Errors that can occur when talking to a router admin interface
#[derive(Error, Debug)]
pub enum RouterError {
    /// Login rejected, or the router could not be reached to log in
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The router or IP service could not be reached
    #[error("network error: {0}")]
    Network(String),

    /// A bounded wait elapsed
    #[error("timed out after {0} seconds")]
    TimedOut(u64),

    /// The router does not expose what was asked of it
    #[error("unsupported router: {0}")]
    UnsupportedRouter(String),

    /// Router answered with an unexpected status
    #[error("router error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Body or message returned by the router
        message: String,
    },

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid router address
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl RouterError {
    /// Returns true if a caller retry may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::TimedOut(_))
    }

    /// Returns true if the error is due to authentication
    ///
    /// Auth failures stay terminal until the credentials are corrected.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthFailed(_))
    }

    /// Returns the HTTP status code if the router answered with one
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
