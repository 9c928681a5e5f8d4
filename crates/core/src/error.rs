//! Error types for the OpenSentinel client.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Misuse and remote failures are kept apart so the fallback layer can
//! tell which ones it is allowed to swallow.

use thiserror::Error;

/// The top-level error type for all OpenSentinel operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // --- Caller errors ---
    /// An authenticated operation was attempted without a credential, or
    /// the HTTP client could not be built from the configuration.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // --- Remote errors ---
    /// The platform answered with a non-success status.
    #[error("OpenSentinel API error ({status}): {body}")]
    Remote { status: u16, body: String },

    /// The request never completed (DNS, refused connection, timeout, TLS).
    #[error("OpenSentinel connection error: {0}")]
    Transport(String),

    /// A success response carried a body that is not JSON.
    #[error("Failed to decode OpenSentinel response: {0}")]
    Decode(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The error raised when an authenticated call runs before `register()`.
    pub fn not_registered() -> Self {
        Self::Configuration {
            message: "Not registered. Call register() first or provide an api_key.".into(),
        }
    }

    /// Whether fallback mode may turn this error into an empty result.
    ///
    /// Configuration errors are programmer mistakes and always surface.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration { .. })
    }

    /// HTTP status of a remote failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
