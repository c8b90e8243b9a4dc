//! Token request model seen by client authentication handlers.

use std::fmt;

/// A request parameter from the token request body.
///
/// A key may carry several values when it was repeated in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameter {
    /// Parameter name as received.
    pub key: String,
    /// Parameter values, in request order.
    pub values: Vec<String>,
}

impl RequestParameter {
    /// Creates a new parameter.
    pub fn new<K, I, V>(key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the first non-empty value.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        first_non_empty(&self.values)
    }
}

/// An HTTP header attached to the token request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequestHeader {
    /// Header name as received.
    pub name: String,
    /// Header values, in request order.
    pub values: Vec<String>,
}

impl HttpRequestHeader {
    /// Creates a new header.
    pub fn new<N, I, V>(name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the first non-empty value.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        first_non_empty(&self.values)
    }
}

fn first_non_empty(values: &[String]) -> Option<&str> {
    values.iter().map(String::as_str).find(|v| !v.is_empty())
}

/// Token request as seen by client authentication handlers.
///
/// Parameters and headers are read-only input owned by the caller.
///
/// # Credential fields
///
/// `client_id` and `client_secret` are a side channel between handlers and
/// later stages of the token pipeline: the first handler that resolves the
/// client credentials writes them here, and anything running afterwards
/// (for example [`ClientAuthHandler::client_id`]) reads them back instead of
/// parsing the request again. Handlers take the request by `&mut`, so a single
/// request cannot be authenticated from two tasks at once; callers that share
/// a request across tasks must serialize access themselves.
///
/// [`ClientAuthHandler::client_id`]: crate::oauth::ClientAuthHandler::client_id
#[derive(Clone, Default)]
pub struct TokenRequest {
    /// Body parameters, in request order.
    pub parameters: Vec<RequestParameter>,

    /// HTTP headers, in request order.
    pub headers: Vec<HttpRequestHeader>,

    /// Resolved client id, written by client authentication handlers.
    pub client_id: Option<String>,

    /// Resolved client secret, written by client authentication handlers.
    pub client_secret: Option<String>,
}

impl TokenRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body parameter.
    #[must_use]
    pub fn with_parameter<K, I, V>(mut self, key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.parameters.push(RequestParameter::new(key, values));
        self
    }

    /// Adds an HTTP header.
    #[must_use]
    pub fn with_header<N, I, V>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.headers.push(HttpRequestHeader::new(name, values));
        self
    }

    /// Returns `true` if a parameter with `key` is present, ignoring case.
    #[must_use]
    pub fn has_parameter(&self, key: &str) -> bool {
        self.parameters
            .iter()
            .any(|p| p.key.eq_ignore_ascii_case(key))
    }

    /// Returns the first non-empty value of the first parameter named `key`
    /// (ignoring case) that has one.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .filter(|p| p.key.eq_ignore_ascii_case(key))
            .find_map(RequestParameter::first_value)
    }

    /// Returns the resolved client id, treating an empty id as absent.
    #[must_use]
    pub fn resolved_client_id(&self) -> Option<&str> {
        self.client_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field(
                "parameters",
                &self.parameters.iter().map(|p| &p.key).collect::<Vec<_>>(),
            )
            .field(
                "headers",
                &self.headers.iter().map(|h| &h.name).collect::<Vec<_>>(),
            )
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
