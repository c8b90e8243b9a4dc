//! Building a [`TokenRequest`] from HTTP request parts.
//!
//! Token endpoint handlers receive the raw headers and the
//! `application/x-www-form-urlencoded` body. These helpers turn them into the
//! parameter and header lists client authentication handlers read.

use axum::http::HeaderMap;
use indexmap::IndexMap;
use url::form_urlencoded;

use crate::types::{HttpRequestHeader, RequestParameter, TokenRequest};

/// Builds a token request from HTTP headers and a form-encoded body.
///
/// Credential fields start out empty.
#[must_use]
pub fn token_request_from_parts(headers: &HeaderMap, body: &[u8]) -> TokenRequest {
    TokenRequest {
        parameters: parameters_from_form(body),
        headers: headers_from_map(headers),
        client_id: None,
        client_secret: None,
    }
}

/// Decodes a form-encoded body into request parameters.
///
/// Repeated keys are grouped into one parameter whose values keep body order.
/// Parameters are ordered by the first occurrence of their key.
#[must_use]
pub fn parameters_from_form(body: &[u8]) -> Vec<RequestParameter> {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in form_urlencoded::parse(body) {
        grouped
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    grouped
        .into_iter()
        .map(|(key, values)| RequestParameter { key, values })
        .collect()
}

/// Converts a header map into request headers.
///
/// Each header name yields one entry holding all of its values. Values that
/// are not valid UTF-8 are dropped, and so are names left without any value.
#[must_use]
pub fn headers_from_map(headers: &HeaderMap) -> Vec<HttpRequestHeader> {
    headers
        .keys()
        .filter_map(|name| {
            let values: Vec<String> = headers
                .get_all(name)
                .iter()
                .filter_map(|v| v.to_str().ok())
                .map(str::to_owned)
                .collect();

            if values.is_empty() {
                tracing::debug!(header = %name, "Skipping header without UTF-8 value");
                return None;
            }

            Some(HttpRequestHeader {
                name: name.as_str().to_owned(),
                values,
            })
        })
        .collect()
}
