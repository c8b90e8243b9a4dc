//! Token endpoint client authentication across several handlers.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use client_auth::prelude::*;
use client_auth::token_request_from_parts;

/// In-memory client registry.
struct InMemoryVerifier {
    clients: RwLock<HashMap<String, String>>, // client_id -> secret
}

impl InMemoryVerifier {
    fn new(clients: &[(&str, &str)]) -> Self {
        Self {
            clients: RwLock::new(
                clients
                    .iter()
                    .map(|(id, secret)| (id.to_string(), secret.to_string()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl ClientCredentialVerifier for InMemoryVerifier {
    async fn verify(&self, client_id: &str, client_secret: &str) -> Result<bool, VerifierError> {
        self.clients
            .read()
            .unwrap()
            .get(client_id)
            .map(|secret| secret == client_secret)
            .ok_or_else(|| VerifierError::invalid_client(client_id))
    }
}

/// Public clients identified by `client_id` alone.
struct PublicClientHandler {
    public_clients: Vec<String>,
}

#[async_trait]
impl ClientAuthHandler for PublicClientHandler {
    fn name(&self) -> &'static str {
        "public"
    }

    fn can_handle(&self, request: &TokenRequest) -> bool {
        request.has_parameter("client_id") && !request.has_parameter("client_secret")
    }

    async fn authenticate(&self, request: &mut TokenRequest) -> AuthResult<ClientAuthOutcome> {
        let client_id = request.parameter("client_id").map(str::to_owned);
        let known = client_id
            .as_ref()
            .is_some_and(|id| self.public_clients.contains(id));
        request.client_id = client_id;
        Ok(known.into())
    }
}

/// Tries every handler in order, returning the client id of the first one
/// that authenticates the request.
async fn authenticate_client(
    handlers: &[Box<dyn ClientAuthHandler>],
    request: &mut TokenRequest,
) -> AuthResult<Option<String>> {
    for handler in handlers {
        if !handler.can_handle(request) {
            continue;
        }
        if handler.authenticate(request).await?.is_authenticated() {
            return handler.client_id(request);
        }
    }
    Ok(None)
}

fn handlers() -> Vec<Box<dyn ClientAuthHandler>> {
    let verifier = Arc::new(InMemoryVerifier::new(&[("alice", "s3cret")]));
    vec![
        Box::new(NoopClientAuthHandler),
        Box::new(BasicClientAuthHandler::new(verifier)),
        Box::new(PublicClientHandler {
            public_clients: vec!["spa".to_string()],
        }),
    ]
}

fn basic_headers(credentials: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = format!("Basic {}", STANDARD.encode(credentials));
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
    headers
}

#[tokio::test]
async fn test_basic_header_authenticates() {
    let mut request = token_request_from_parts(
        &basic_headers("alice:s3cret"),
        b"grant_type=client_credentials",
    );

    let client_id = authenticate_client(&handlers(), &mut request).await.unwrap();

    assert_eq!(client_id.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_body_credentials_authenticate() {
    let mut request = token_request_from_parts(
        &HeaderMap::new(),
        b"grant_type=client_credentials&client_id=alice&client_secret=s3cret",
    );

    let client_id = authenticate_client(&handlers(), &mut request).await.unwrap();

    assert_eq!(client_id.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_public_client_falls_through_basic_handler() {
    let mut request = token_request_from_parts(
        &HeaderMap::new(),
        b"grant_type=authorization_code&client_id=spa",
    );

    let client_id = authenticate_client(&handlers(), &mut request).await.unwrap();

    assert_eq!(client_id.as_deref(), Some("spa"));
}

#[tokio::test]
async fn test_mixed_methods_stop_the_pipeline() {
    let mut request = token_request_from_parts(
        &basic_headers("alice:s3cret"),
        b"grant_type=client_credentials&client_id=alice&client_secret=s3cret",
    );

    let result = authenticate_client(&handlers(), &mut request).await;

    let err = result.unwrap_err();
    assert!(matches!(err, AuthError::MultipleAuthMethods));
    assert_eq!(err.oauth_error_code(), "invalid_request");
}

#[tokio::test]
async fn test_unknown_client_stops_the_pipeline() {
    let mut request = token_request_from_parts(
        &basic_headers("mallory:guess"),
        b"grant_type=client_credentials",
    );

    let err = authenticate_client(&handlers(), &mut request)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid client: mallory");
    assert_eq!(err.oauth_error_code(), "invalid_client");
}

#[test]
fn test_malformed_header_leaves_request_unauthenticated() {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic not-base64!!"));
    let mut request = token_request_from_parts(&headers, b"grant_type=client_credentials");

    let client_id =
        tokio_test::block_on(authenticate_client(&handlers(), &mut request)).unwrap();

    assert_eq!(client_id, None);
}

#[test]
fn test_handler_config_from_toml() {
    let config = BasicAuthConfig::from_toml_str(
        r#"
        client_id_param = "app_id"
        client_secret_param = "app_secret"
        "#,
    )
    .unwrap();
    let verifier = Arc::new(InMemoryVerifier::new(&[("alice", "s3cret")]));
    let handler = BasicClientAuthHandler::with_config(verifier, config).unwrap();

    let mut request =
        token_request_from_parts(&HeaderMap::new(), b"app_id=alice&app_secret=s3cret");

    assert!(handler.can_handle(&request));
    let outcome = tokio_test::block_on(handler.authenticate(&mut request)).unwrap();
    assert_eq!(outcome, ClientAuthOutcome::Authenticated);
}
