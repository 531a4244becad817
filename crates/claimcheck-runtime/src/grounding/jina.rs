//! Jina grounding API endpoint.
//!
//! - Body mode: `POST {base_url}` with `{"statement": "<claim>"}`
//! - Path mode: `GET {base_url}<percent-escaped claim>`
//!
//! Both modes authenticate with a bearer token and ask for JSON.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Serialize;
use std::time::Duration;

use super::{GroundingEndpoint, RawResponse, TransportError, TransportMode};
use crate::config::GroundingConfig;
use crate::credentials::ApiCredential;

#[derive(Debug, Serialize)]
struct StatementRequest<'a> {
    statement: &'a str,
}

/// HTTP endpoint for the Jina grounding service.
pub struct JinaEndpoint {
    credential: ApiCredential,
    base_url: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl std::fmt::Debug for JinaEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinaEndpoint")
            .field("credential", &self.credential)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl JinaEndpoint {
    /// Create an endpoint from configuration and an injected credential.
    pub fn new(credential: ApiCredential, config: &GroundingConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            TransportError::InvalidRequest(format!("invalid grounding base_url: {}", e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidRequest(
                "grounding base_url cannot carry a path".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::HttpError(e.to_string()))?;

        Ok(Self {
            credential,
            base_url,
            timeout: config.timeout,
            client,
        })
    }

    /// URL for path mode: the claim becomes one escaped path segment.
    ///
    /// Slashes and other reserved characters inside the claim are escaped,
    /// so the claim never changes the route.
    fn path_url(&self, claim: &str) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TransportError::InvalidRequest("grounding base_url cannot carry a path".to_string())
            })?
            .pop_if_empty()
            .push(claim);
        Ok(url)
    }

    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::HttpError(error.to_string())
        }
    }
}

#[async_trait]
impl GroundingEndpoint for JinaEndpoint {
    async fn send(&self, claim: &str, mode: TransportMode) -> Result<RawResponse, TransportError> {
        let request = match mode {
            TransportMode::Body => self
                .client
                .post(self.base_url.clone())
                .json(&StatementRequest { statement: claim }),
            TransportMode::Path => self.client.get(self.path_url(claim)?),
        };

        // SECURITY: the credential is only exposed here, at the point of use
        let response = request
            .bearer_auth(self.credential.expose())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(RawResponse { status, body })
    }

    fn name(&self) -> &str {
        "jina"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(base_url: &str) -> Result<JinaEndpoint, TransportError> {
        let config = GroundingConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        JinaEndpoint::new(ApiCredential::new("test-key", "Jina API key"), &config)
    }

    #[test]
    fn test_path_url_escapes_claim() {
        let endpoint = endpoint("https://g.jina.ai/").unwrap();
        let url = endpoint.path_url("Earth is round/flat? #1").unwrap();
        assert_eq!(url.as_str(), "https://g.jina.ai/Earth%20is%20round%2Fflat%3F%20%231");
    }

    #[test]
    fn test_path_url_escapes_non_ascii() {
        let endpoint = endpoint("https://g.jina.ai").unwrap();
        let url = endpoint.path_url("Мир").unwrap();
        assert_eq!(url.as_str(), "https://g.jina.ai/%D0%9C%D0%B8%D1%80");
    }

    #[test]
    fn test_path_url_keeps_base_path() {
        let endpoint = endpoint("http://localhost:8080/ground/").unwrap();
        let url = endpoint.path_url("x").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/ground/x");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(matches!(endpoint("not a url"), Err(TransportError::InvalidRequest(_))));
        assert!(matches!(endpoint("mailto:someone@example.com"), Err(TransportError::InvalidRequest(_))));
    }

    #[test]
    fn test_credential_not_in_debug_output() {
        let endpoint = endpoint("https://g.jina.ai/").unwrap();
        let debug = format!("{:?}", endpoint);
        assert!(!debug.contains("test-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
