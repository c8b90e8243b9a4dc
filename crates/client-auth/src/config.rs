//! Client authentication handler configuration.
//!
//! Configuration is fixed when a handler is constructed and never changes
//! afterwards, so handlers can be shared freely between tasks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical body parameter carrying the client id.
pub const CLIENT_ID_PARAM: &str = "client_id";

/// Canonical body parameter carrying the client secret.
pub const CLIENT_SECRET_PARAM: &str = "client_secret";

/// Configuration for the Basic-credentials client authentication handler.
///
/// # Example (TOML)
///
/// ```toml
/// client_id_param = "client_id"
/// client_secret_param = "client_secret"
///
/// [properties]
/// tenant = "carbon.super"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BasicAuthConfig {
    /// Body parameter name holding the client id.
    /// Matched case-insensitively.
    pub client_id_param: String,

    /// Body parameter name holding the client secret.
    /// Matched case-insensitively.
    pub client_secret_param: String,

    /// Free-form properties handed to the handler at construction.
    pub properties: BTreeMap<String, String>,
}

impl Default for BasicAuthConfig {
    fn default() -> Self {
        Self {
            client_id_param: CLIENT_ID_PARAM.to_string(),
            client_secret_param: CLIENT_SECRET_PARAM.to_string(),
            properties: BTreeMap::new(),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// The configuration document could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl BasicAuthConfig {
    /// Parses and validates a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the document is not valid TOML for this
    /// type, or the validation error from [`BasicAuthConfig::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - A parameter name is empty
    /// - Both parameter names are the same (ignoring case)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id_param.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "client_id_param cannot be empty".to_string(),
            ));
        }

        if self.client_secret_param.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "client_secret_param cannot be empty".to_string(),
            ));
        }

        if self
            .client_id_param
            .eq_ignore_ascii_case(&self.client_secret_param)
        {
            return Err(ConfigError::InvalidValue(format!(
                "client_id_param and client_secret_param must differ, both are '{}'",
                self.client_id_param
            )));
        }

        Ok(())
    }

    /// Returns a configured property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}
