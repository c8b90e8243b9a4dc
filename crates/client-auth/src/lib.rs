//! # client-auth
//!
//! Client authentication for OAuth 2.0 token endpoints.
//!
//! This crate provides:
//! - A pluggable [`ClientAuthHandler`] contract for client authentication methods
//! - HTTP Basic / request-body client credentials (`client_secret_basic`,
//!   `client_secret_post`) with the single-method rule of RFC 6749
//! - A [`ClientCredentialVerifier`] seam for the client trust store
//! - Adapters from HTTP request parts to the [`TokenRequest`] model
//!
//! ## Modules
//!
//! - [`config`] - Handler configuration
//! - [`oauth`] - Client authentication handlers
//! - [`types`] - Token request and credential types
//! - [`storage`] - Credential verifier trait
//! - [`http`] - Request construction from HTTP parts
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod storage;
pub mod types;

pub use config::{BasicAuthConfig, ConfigError};
pub use error::{AuthError, ErrorCategory};
pub use http::token_request_from_parts;
pub use oauth::{
    BasicClientAuthHandler, ClientAuthHandler, ClientAuthOutcome, NoopClientAuthHandler,
    decode_basic_credentials,
};
pub use storage::{ClientCredentialVerifier, VerifierError};
pub use types::{ClientCredentials, HttpRequestHeader, RequestParameter, TokenRequest};

/// Type alias for client authentication results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use client_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::config::{BasicAuthConfig, ConfigError};
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::oauth::{
        BasicClientAuthHandler, ClientAuthHandler, ClientAuthOutcome, NoopClientAuthHandler,
    };
    pub use crate::storage::{ClientCredentialVerifier, VerifierError};
    pub use crate::types::{ClientCredentials, TokenRequest};
}
