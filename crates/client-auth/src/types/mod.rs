//! Core types for token endpoint client authentication.
//!
//! - [`TokenRequest`] - The request handed to client authentication handlers
//! - [`ClientCredentials`] - An extracted client id/secret pair

mod credentials;
mod request;

pub use credentials::ClientCredentials;
pub use request::{HttpRequestHeader, RequestParameter, TokenRequest};
