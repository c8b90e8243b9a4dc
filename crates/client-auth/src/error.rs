//! Client authentication error types.
//!
//! This module defines the errors a client authentication handler can
//! surface to the token endpoint. Malformed `Authorization` headers are
//! usually absorbed by the handler and reported as a negative outcome;
//! everything here is a terminal failure for the request.

use std::error::Error as StdError;
use std::fmt;

/// Boxed cause carried by backend failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors that can occur while authenticating a client at the token endpoint.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The verifier does not know the presented client id.
    #[error("Invalid client: {client_id}")]
    InvalidClient {
        /// The client id that was rejected.
        client_id: String,
    },

    /// Credentials were sent both in the `Authorization` header and in the
    /// request body.
    #[error("Client authentication failed: multiple authentication methods")]
    MultipleAuthMethods,

    /// The `Authorization` header does not decode to `id:secret`.
    #[error("Malformed credential header: {message}")]
    MalformedCredentialHeader {
        /// Description of the decode failure.
        message: String,
    },

    /// The credential verifier could not complete the check.
    #[error("Authentication error: {message}")]
    Verification {
        /// Description of the failure.
        message: String,
        /// Underlying backend error.
        #[source]
        source: Option<BoxError>,
    },

    /// The handler configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidClient` error.
    #[must_use]
    pub fn invalid_client(client_id: impl Into<String>) -> Self {
        Self::InvalidClient {
            client_id: client_id.into(),
        }
    }

    /// Creates a new `MalformedCredentialHeader` error.
    #[must_use]
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::MalformedCredentialHeader {
            message: message.into(),
        }
    }

    /// Creates a new `Verification` error wrapping `source`.
    #[must_use]
    pub fn verification_with_source(message: impl Into<String>, source: BoxError) -> Self {
        Self::Verification {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidClient { .. }
                | Self::MultipleAuthMethods
                | Self::MalformedCredentialHeader { .. }
        )
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Verification { .. } | Self::Configuration { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidClient { .. } => ErrorCategory::Authentication,
            Self::MultipleAuthMethods => ErrorCategory::Validation,
            Self::MalformedCredentialHeader { .. } => ErrorCategory::Validation,
            Self::Verification { .. } => ErrorCategory::Infrastructure,
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// Returns the OAuth 2.0 error code for this error.
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::InvalidClient { .. } => "invalid_client",
            Self::MultipleAuthMethods => "invalid_request",
            Self::MalformedCredentialHeader { .. } => "invalid_request",
            Self::Verification { .. } => "server_error",
            Self::Configuration { .. } => "server_error",
        }
    }
}

/// Categories of client authentication errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The client identity was rejected.
    Authentication,
    /// The request violates the authentication protocol.
    Validation,
    /// The verification backend failed.
    Infrastructure,
    /// Configuration errors.
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::Validation => write!(f, "validation"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}
