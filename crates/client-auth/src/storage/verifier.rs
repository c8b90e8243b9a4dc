//! Client credential verifier trait.
//!
//! Defines the interface to the trust store that checks a client id/secret
//! pair. Implementations are provided by the hosting server (database-backed
//! client registry, in-memory fixtures, remote identity service, ...).

use async_trait::async_trait;

use crate::error::BoxError;

// =============================================================================
// Verifier Errors
// =============================================================================

/// Errors reported by a [`ClientCredentialVerifier`].
#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    /// The client id is not registered.
    #[error("Unknown client: {client_id}")]
    InvalidClient {
        /// The unknown client id.
        client_id: String,
    },

    /// The trust store could not complete the check.
    #[error("Verifier backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
        /// Underlying error.
        #[source]
        source: Option<BoxError>,
    },
}

impl VerifierError {
    /// Creates a new `InvalidClient` error.
    #[must_use]
    pub fn invalid_client(client_id: impl Into<String>) -> Self {
        Self::InvalidClient {
            client_id: client_id.into(),
        }
    }

    /// Creates a new `Backend` error wrapping `source`.
    #[must_use]
    pub fn backend_with_source(message: impl Into<String>, source: BoxError) -> Self {
        Self::Backend {
            message: message.into(),
            source: Some(source),
        }
    }
}

// =============================================================================
// Verifier Trait
// =============================================================================

/// Checks client credentials against a trust store.
///
/// The verifier is called at most once per authentication attempt and is never
/// retried by the handlers in this crate. Callers that need a deadline should
/// wrap the authentication future themselves.
///
/// # Example
///
/// ```ignore
/// use client_auth::storage::ClientCredentialVerifier;
///
/// async fn example(verifier: &impl ClientCredentialVerifier) {
///     if verifier.verify("my-app", "secret").await? {
///         println!("client authenticated");
///     }
/// }
/// ```
#[async_trait]
pub trait ClientCredentialVerifier: Send + Sync {
    /// Verify a client secret.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the secret matches
    /// - `Ok(false)` if the secret doesn't match
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::InvalidClient` if the client id is unknown and
    /// `VerifierError::Backend` if the trust store could not be queried.
    async fn verify(&self, client_id: &str, client_secret: &str) -> Result<bool, VerifierError>;
}
