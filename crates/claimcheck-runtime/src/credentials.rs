//! Secure credential handling for the external services.
//!
//! Credentials are loaded once at the process boundary and injected into
//! component constructors. Pipeline components never read the process
//! environment themselves.
//!
//! - **No accidental logging**: credentials print as `[REDACTED]` in Debug/Display
//! - **Memory safety**: values are zeroed on drop via `secrecy`
//! - **Explicit exposure**: the raw value is only reachable through [`ApiCredential::expose`]
//!
//! ## Usage
//!
//! ```ignore
//! use claimcheck_runtime::credentials::ApiCredential;
//!
//! let grounding = ApiCredential::from_env("JINA_API_KEY", "Jina API key")?;
//! let translation = ApiCredential::from_env_optional("GEMINI_API_KEY", "Gemini API key");
//!
//! // Use in an HTTP header (explicit exposure)
//! request.bearer_auth(grounding.expose());
//! ```

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use thiserror::Error;

/// Environment variable holding the grounding service key.
pub const GROUNDING_API_KEY_ENV: &str = "JINA_API_KEY";

/// Environment variable holding the translation service key.
pub const TRANSLATION_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Errors loading credentials.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("{name} not set: configure '{env_var}' environment variable")]
    Missing { name: &'static str, env_var: String },
}

/// Where a credential was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable
    Environment,
    /// Provided programmatically
    Programmatic,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::Programmatic => write!(f, "programmatic"),
        }
    }
}

/// A securely-stored API credential.
pub struct ApiCredential {
    value: SecretString,
    source: CredentialSource,
    name: &'static str,
}

impl ApiCredential {
    /// Wrap a value provided by the caller.
    pub fn new(value: impl Into<String>, name: &'static str) -> Self {
        Self::with_source(value, CredentialSource::Programmatic, name)
    }

    fn with_source(value: impl Into<String>, source: CredentialSource, name: &'static str) -> Self {
        Self {
            value: SecretString::from(value.into()),
            source,
            name,
        }
    }

    /// Load a required credential from an environment variable.
    ///
    /// An empty value counts as missing.
    pub fn from_env(env_var: &str, name: &'static str) -> Result<Self, CredentialError> {
        Self::from_env_optional(env_var, name).ok_or_else(|| CredentialError::Missing {
            name,
            env_var: env_var.to_string(),
        })
    }

    /// Load an optional credential from an environment variable.
    pub fn from_env_optional(env_var: &str, name: &'static str) -> Option<Self> {
        std::env::var(env_var)
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| Self::with_source(v, CredentialSource::Environment, name))
    }

    /// Check whether an environment variable holds a usable credential,
    /// without loading it.
    pub fn is_available(env_var: &str) -> bool {
        std::env::var(env_var).map(|v| !v.is_empty()).unwrap_or(false)
    }

    /// Expose the credential value at the point of use.
    ///
    /// Never store the exposed value.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.value.expose_secret().is_empty()
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} [REDACTED]", self.name, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_redacted_in_debug() {
        let secret = "jina_super-secret-key-12345";
        let cred = ApiCredential::new(secret, "Test API key");

        let debug = format!("{:?}", cred);
        assert!(!debug.contains(secret), "Secret exposed in Debug!");
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_credential_redacted_in_display() {
        let secret = "jina_super-secret-key-12345";
        let cred = ApiCredential::new(secret, "Test API key");

        let display = format!("{}", cred);
        assert!(!display.contains(secret), "Secret exposed in Display!");
        assert!(display.contains("[REDACTED]"));
        assert!(display.contains("Test API key"));
        assert!(display.contains("programmatic"));
    }

    #[test]
    fn test_credential_expose() {
        let cred = ApiCredential::new("key-1", "Test API key");
        assert_eq!(cred.expose(), "key-1");
        assert_eq!(cred.source(), CredentialSource::Programmatic);
        assert!(!cred.is_empty());
        assert!(ApiCredential::new("", "Empty").is_empty());
    }

    #[test]
    fn test_from_env_loads_value() {
        std::env::set_var("CLAIMCHECK_TEST_KEY_PRESENT", "env-key");
        let cred = ApiCredential::from_env("CLAIMCHECK_TEST_KEY_PRESENT", "Test key").unwrap();

        assert_eq!(cred.expose(), "env-key");
        assert_eq!(cred.source(), CredentialSource::Environment);
        assert!(ApiCredential::is_available("CLAIMCHECK_TEST_KEY_PRESENT"));

        std::env::remove_var("CLAIMCHECK_TEST_KEY_PRESENT");
    }

    #[test]
    fn test_from_env_error_when_missing() {
        let result = ApiCredential::from_env("CLAIMCHECK_NONEXISTENT_VAR_12345", "Test key");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Test key"));
        assert!(err.to_string().contains("CLAIMCHECK_NONEXISTENT_VAR_12345"));
    }

    #[test]
    fn test_empty_env_value_counts_as_missing() {
        std::env::set_var("CLAIMCHECK_TEST_KEY_EMPTY", "");
        assert!(ApiCredential::from_env_optional("CLAIMCHECK_TEST_KEY_EMPTY", "Test key").is_none());
        assert!(!ApiCredential::is_available("CLAIMCHECK_TEST_KEY_EMPTY"));
        std::env::remove_var("CLAIMCHECK_TEST_KEY_EMPTY");
    }
}
