//! OAuth 2.0 token endpoint client authentication.
//!
//! - [`handler`] - The [`ClientAuthHandler`] contract and its no-op default
//! - [`basic`] - Client id/secret from the `Authorization` header or the body
//!
//! # Example
//!
//! ```ignore
//! use client_auth::oauth::{BasicClientAuthHandler, ClientAuthHandler, ClientAuthOutcome};
//!
//! let handlers: Vec<Box<dyn ClientAuthHandler>> =
//!     vec![Box::new(BasicClientAuthHandler::new(verifier))];
//!
//! for handler in &handlers {
//!     if handler.can_handle(&request)
//!         && handler.authenticate(&mut request).await?.is_authenticated()
//!     {
//!         return Ok(handler.client_id(&mut request)?);
//!     }
//! }
//! ```

pub mod basic;
pub mod handler;

pub use basic::{BasicClientAuthHandler, authorization_header, decode_basic_credentials};
pub use handler::{ClientAuthHandler, ClientAuthOutcome, NoopClientAuthHandler};
