//! Gateway error taxonomy.

use reqwest::StatusCode;

/// Errors returned by gateway calls.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure: connect, timeout, or body read.
    #[error("network error: {path}")]
    Network {
        /// Request path relative to the API base URL.
        path: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status returned by TMDB.
    #[error("TMDB API error (HTTP {status}): {message}")]
    Remote {
        /// HTTP status code.
        status: StatusCode,
        /// `status_message` from the TMDB error body, or the raw body.
        message: String,
    },

    /// Success status but the body did not decode.
    #[error("failed to decode JSON response: {path}")]
    Decode {
        /// Request path relative to the API base URL.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The request path could not be joined onto the base URL.
    #[error("failed to join URL path: {path}")]
    InvalidUrl {
        /// Offending path.
        path: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

impl Error {
    /// Returns `true` for transport failures.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns the HTTP status for remote errors.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Gateway result alias.
pub type Result<T> = std::result::Result<T, Error>;
