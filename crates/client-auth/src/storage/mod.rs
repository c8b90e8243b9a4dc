//! Storage traits used by client authentication.
//!
//! Client authentication only needs one thing from storage: a way to check a
//! client id/secret pair. Implementations live in the hosting server.

pub mod verifier;

pub use verifier::{ClientCredentialVerifier, VerifierError};
