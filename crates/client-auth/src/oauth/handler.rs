//! Client authentication handler contract.
//!
//! A token endpoint may support several client authentication methods. Each
//! one is a [`ClientAuthHandler`]; the endpoint asks every registered handler
//! whether it can deal with the request and lets the first applicable one
//! authenticate it.
//!
//! Every method has a default body, so a handler only overrides what it
//! changes. [`NoopClientAuthHandler`] uses all defaults and never
//! authenticates anything.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::TokenRequest;

/// Outcome of a client authentication attempt that did not fail outright.
///
/// Protocol violations and backend failures are reported as
/// [`AuthError`](crate::AuthError) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientAuthOutcome {
    /// The client proved its identity.
    Authenticated,

    /// The client did not prove its identity. Other handlers may still be
    /// tried.
    NotAuthenticated,
}

impl ClientAuthOutcome {
    /// Returns `true` for [`ClientAuthOutcome::Authenticated`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

impl From<bool> for ClientAuthOutcome {
    fn from(authenticated: bool) -> Self {
        if authenticated {
            Self::Authenticated
        } else {
            Self::NotAuthenticated
        }
    }
}

/// A client authentication method for the token endpoint.
///
/// Handlers hold no per-request state and may be shared between tasks. The
/// request is taken by `&mut` because handlers record the resolved client
/// credentials on it (see [`TokenRequest`]).
#[async_trait]
pub trait ClientAuthHandler: Send + Sync {
    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    /// Returns `true` if this handler recognizes credentials in `request`.
    ///
    /// Must not modify the request or fail.
    fn can_handle(&self, _request: &TokenRequest) -> bool {
        false
    }

    /// Authenticates the client of `request`.
    ///
    /// # Errors
    ///
    /// Returns an error for protocol violations or when the credentials could
    /// not be checked. A plain negative answer is
    /// `Ok(ClientAuthOutcome::NotAuthenticated)`.
    async fn authenticate(&self, _request: &mut TokenRequest) -> AuthResult<ClientAuthOutcome> {
        Ok(ClientAuthOutcome::NotAuthenticated)
    }

    /// Resolves the client id of `request` without verifying it.
    ///
    /// The default returns whatever a previous handler recorded on the request.
    ///
    /// # Errors
    ///
    /// Implementations may fail when the request carries unusable credentials.
    fn client_id(&self, request: &mut TokenRequest) -> AuthResult<Option<String>> {
        Ok(request.resolved_client_id().map(str::to_owned))
    }
}

/// Handler that recognizes nothing and authenticates nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopClientAuthHandler;

#[async_trait]
impl ClientAuthHandler for NoopClientAuthHandler {
    fn name(&self) -> &'static str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_bool() {
        assert_eq!(
            ClientAuthOutcome::from(true),
            ClientAuthOutcome::Authenticated
        );
        assert_eq!(
            ClientAuthOutcome::from(false),
            ClientAuthOutcome::NotAuthenticated
        );
        assert!(ClientAuthOutcome::Authenticated.is_authenticated());
        assert!(!ClientAuthOutcome::NotAuthenticated.is_authenticated());
    }

    #[test]
    fn test_noop_handler_cannot_handle() {
        let request = TokenRequest::new()
            .with_parameter("client_id", ["foo"])
            .with_parameter("client_secret", ["bar"]);

        assert!(!NoopClientAuthHandler.can_handle(&request));
    }

    #[tokio::test]
    async fn test_noop_handler_does_not_authenticate() {
        let mut request = TokenRequest::new()
            .with_parameter("client_id", ["foo"])
            .with_parameter("client_secret", ["bar"]);

        let outcome = NoopClientAuthHandler
            .authenticate(&mut request)
            .await
            .unwrap();

        assert_eq!(outcome, ClientAuthOutcome::NotAuthenticated);
        assert_eq!(request.client_id, None);
    }

    #[test]
    fn test_default_client_id_reads_request_field() {
        let mut request = TokenRequest::new().with_parameter("client_id", ["foo"]);
        assert_eq!(NoopClientAuthHandler.client_id(&mut request).unwrap(), None);

        request.client_id = Some("recorded".to_string());
        assert_eq!(
            NoopClientAuthHandler.client_id(&mut request).unwrap(),
            Some("recorded".to_string())
        );
    }
}
