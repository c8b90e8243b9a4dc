//! Basic-credentials client authentication.
//!
//! Implements the `client_secret_basic` and `client_secret_post` methods of
//! RFC 6749 Section 2.3.1 as a single handler:
//!
//! - `client_secret_basic` - `Authorization: Basic base64(client_id:client_secret)`
//! - `client_secret_post` - `client_id` and `client_secret` in the request body
//!
//! A client must not use more than one method in a request. When the header
//! and both body parameters are present the request is rejected instead of
//! preferring either one.
//!
//! # Header matching
//!
//! The `Authorization` header is recognized when its value *contains*
//! `Basic` anywhere, not only as a scheme prefix. A value such as
//! `NonBasicTokenXYZ` is therefore treated as a Basic header and then fails
//! to decode. Tightening the match would change which requests this handler
//! accepts.
//!
//! # Malformed headers
//!
//! [`BasicClientAuthHandler::authenticate`] reports an undecodable header as
//! `NotAuthenticated` so the token endpoint can try other handlers.
//! [`BasicClientAuthHandler::client_id`] has no such fallback and returns the
//! decode error.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::AuthResult;
use crate::config::BasicAuthConfig;
use crate::error::AuthError;
use crate::oauth::handler::{ClientAuthHandler, ClientAuthOutcome};
use crate::storage::{ClientCredentialVerifier, VerifierError};
use crate::types::{ClientCredentials, TokenRequest};

const AUTHORIZATION_HEADER: &str = "authorization";

const BASIC_SCHEME: &str = "Basic";

const HEADER_FORMAT_VIOLATED: &str =
    "Space delimited \"<authMethod> <base64Hash>\" format violated";

/// Client authentication with a client id and secret sent either in the
/// `Authorization` header or in the request body.
///
/// # Example
///
/// ```ignore
/// let handler = BasicClientAuthHandler::new(verifier);
///
/// if handler.can_handle(&request) {
///     match handler.authenticate(&mut request).await? {
///         ClientAuthOutcome::Authenticated => { /* issue tokens */ }
///         ClientAuthOutcome::NotAuthenticated => { /* try the next handler */ }
///     }
/// }
/// ```
#[derive(Clone)]
pub struct BasicClientAuthHandler {
    verifier: Arc<dyn ClientCredentialVerifier>,
    config: BasicAuthConfig,
}

impl BasicClientAuthHandler {
    /// Creates a handler with the default configuration.
    pub fn new(verifier: Arc<dyn ClientCredentialVerifier>) -> Self {
        Self {
            verifier,
            config: BasicAuthConfig::default(),
        }
    }

    /// Creates a handler with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if the configuration is invalid.
    pub fn with_config(
        verifier: Arc<dyn ClientCredentialVerifier>,
        config: BasicAuthConfig,
    ) -> AuthResult<Self> {
        config
            .validate()
            .map_err(|e| AuthError::configuration(e.to_string()))?;

        Ok(Self { verifier, config })
    }

    /// Returns the handler configuration.
    #[must_use]
    pub fn config(&self) -> &BasicAuthConfig {
        &self.config
    }

    /// Returns `true` if both the client id and client secret parameters are
    /// present in the body, whatever their values.
    fn has_body_credentials(&self, request: &TokenRequest) -> bool {
        request.has_parameter(&self.config.client_id_param)
            && request.has_parameter(&self.config.client_secret_param)
    }

    /// Rejects requests that carry credentials both in the header and in the
    /// body.
    fn ensure_single_method(&self, request: &TokenRequest) -> AuthResult<()> {
        if self.has_body_credentials(request) {
            tracing::debug!(
                handler = self.name(),
                "Client Id and Client Secret found in request body and Authorization header. \
                 Credentials should be sent in either request body or Authorization header, not both"
            );
            return Err(AuthError::MultipleAuthMethods);
        }
        Ok(())
    }

    /// Copies body credentials onto the request. A field is overwritten
    /// whenever its parameter key is present, with an empty string when the
    /// parameter has no non-empty value. Fields without a matching key are
    /// left untouched.
    fn set_credentials_from_params(&self, request: &mut TokenRequest) {
        if let Some(client_id) = body_value(request, &self.config.client_id_param) {
            request.client_id = Some(client_id);
        }
        if let Some(client_secret) = body_value(request, &self.config.client_secret_param) {
            request.client_secret = Some(client_secret);
        }
    }

    /// Resolves the client credentials from the header or, when there is no
    /// Basic header, from the body, and records them on the request.
    fn extract_credentials(&self, request: &mut TokenRequest) -> AuthResult<()> {
        match authorization_header(request) {
            Some(header) => {
                self.ensure_single_method(request)?;
                let credentials = decode_basic_credentials(header)?;
                request.client_id = Some(credentials.client_id);
                request.client_secret = Some(credentials.client_secret);
            }
            None => self.set_credentials_from_params(request),
        }
        Ok(())
    }
}

#[async_trait]
impl ClientAuthHandler for BasicClientAuthHandler {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn can_handle(&self, request: &TokenRequest) -> bool {
        self.has_body_credentials(request) || authorization_header(request).is_some()
    }

    async fn authenticate(&self, request: &mut TokenRequest) -> AuthResult<ClientAuthOutcome> {
        match self.extract_credentials(request) {
            Ok(()) => {}
            Err(AuthError::MalformedCredentialHeader { message }) => {
                tracing::error!(
                    handler = self.name(),
                    "Error while extracting client id and secret from Authorization header"
                );
                tracing::debug!(handler = self.name(), error = %message, "Header decode failure");
                return Ok(ClientAuthOutcome::NotAuthenticated);
            }
            Err(e) => return Err(e),
        }

        let Some(client_id) = request.resolved_client_id().map(str::to_owned) else {
            return Ok(ClientAuthOutcome::NotAuthenticated);
        };
        let client_secret = request.client_secret.clone().unwrap_or_default();

        tracing::debug!(client_id = %client_id, "Authenticating client with client secret");

        match self.verifier.verify(&client_id, &client_secret).await {
            Ok(true) => {
                tracing::debug!(client_id = %client_id, "Client authenticated");
                Ok(ClientAuthOutcome::Authenticated)
            }
            Ok(false) => {
                tracing::debug!(client_id = %client_id, "Client secret rejected");
                Ok(ClientAuthOutcome::NotAuthenticated)
            }
            Err(VerifierError::InvalidClient { .. }) => {
                tracing::warn!(client_id = %client_id, "Unknown client");
                Err(AuthError::invalid_client(client_id))
            }
            Err(e @ VerifierError::Backend { .. }) => {
                tracing::warn!(client_id = %client_id, error = %e, "Client verification failed");
                Err(AuthError::verification_with_source(
                    "error while authenticating client",
                    Box::new(e),
                ))
            }
        }
    }

    fn client_id(&self, request: &mut TokenRequest) -> AuthResult<Option<String>> {
        if let Some(client_id) = request.resolved_client_id() {
            return Ok(Some(client_id.to_owned()));
        }

        self.extract_credentials(request).inspect_err(|e| {
            tracing::debug!(handler = self.name(), error = %e, "Unable to resolve client id");
        })?;

        Ok(request.resolved_client_id().map(str::to_owned))
    }
}

fn body_value(request: &TokenRequest, key: &str) -> Option<String> {
    request
        .has_parameter(key)
        .then(|| request.parameter(key).unwrap_or_default().to_owned())
}

/// Returns the value of the first `Authorization` header (name matched
/// ignoring case) whose first non-empty value contains `Basic`.
#[must_use]
pub fn authorization_header(request: &TokenRequest) -> Option<&str> {
    request
        .headers
        .iter()
        .filter(|h| h.name.eq_ignore_ascii_case(AUTHORIZATION_HEADER))
        .filter_map(|h| h.first_value())
        .find(|value| value.contains(BASIC_SCHEME))
}

/// Decodes a `"<scheme> <base64(id:secret)>"` authorization value.
///
/// The value must split on spaces into exactly two tokens, and the decoded
/// payload must split on `:` into exactly two parts once trailing empty
/// parts are dropped. An empty client id (`":secret"`) is accepted here.
///
/// # Errors
///
/// Returns `AuthError::MalformedCredentialHeader` if the value does not have
/// that shape.
///
/// # Example
///
/// ```ignore
/// let credentials = decode_basic_credentials("Basic YWxpY2U6czNjcmV0")?;
/// assert_eq!(credentials.client_id, "alice");
/// ```
pub fn decode_basic_credentials(header_value: &str) -> AuthResult<ClientCredentials> {
    let tokens: Vec<&str> = header_value.trim().split(' ').collect();
    let [_scheme, payload] = tokens.as_slice() else {
        return Err(AuthError::malformed_header(HEADER_FORMAT_VIOLATED));
    };

    let decoded = STANDARD.decode(payload.trim()).map_err(|e| {
        AuthError::malformed_header(format!("{HEADER_FORMAT_VIOLATED}: invalid base64 ({e})"))
    })?;
    let decoded = String::from_utf8(decoded).map_err(|_| {
        AuthError::malformed_header(format!("{HEADER_FORMAT_VIOLATED}: invalid UTF-8"))
    })?;

    // Trailing empty parts do not count: "id:" and ":" are rejected.
    let mut parts: Vec<&str> = decoded.split(':').collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    let [client_id, client_secret] = parts.as_slice() else {
        return Err(AuthError::malformed_header(format!(
            "{HEADER_FORMAT_VIOLATED}: credentials must be 'id:secret'"
        )));
    };

    Ok(ClientCredentials::new(*client_id, *client_secret))
}
