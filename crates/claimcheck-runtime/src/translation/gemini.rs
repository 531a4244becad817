//! Gemini `generateContent` translator.
//!
//! Sends a single translation-only instruction and reads the first text part
//! of the first candidate. The API key travels as the `key` query parameter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ReasonTranslator;
use crate::config::TranslationConfig;
use crate::credentials::ApiCredential;
use crate::grounding::TransportError;

/// Internal failure reasons; never surfaced past [`GeminiTranslator::translate`].
#[derive(Error, Debug)]
enum TranslationError {
    /// Built by [`TranslationError::http`]; the URL carries the key and is stripped.
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No candidates in response")]
    NoCandidates,

    #[error("Candidate has no text")]
    EmptyText,
}

impl TranslationError {
    fn http(error: reqwest::Error) -> Self {
        TranslationError::Http(error.without_url())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Translator backed by the Gemini generative API.
pub struct GeminiTranslator {
    credential: Option<ApiCredential>,
    endpoint: String,
    target_language: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiTranslator")
            .field("credential", &self.credential)
            .field("endpoint", &self.endpoint)
            .field("target_language", &self.target_language)
            .finish()
    }
}

impl GeminiTranslator {
    /// Create a translator. Without a credential it returns texts unchanged
    /// and never touches the network.
    pub fn new(
        credential: Option<ApiCredential>,
        config: &TranslationConfig,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::HttpError(e.to_string()))?;

        Ok(Self {
            credential,
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            target_language: config.target_language.clone(),
            client,
        })
    }

    /// Whether a usable credential is configured.
    pub fn is_configured(&self) -> bool {
        self.credential.as_ref().is_some_and(|c| !c.is_empty())
    }

    fn instruction(&self, text: &str) -> String {
        format!(
            "Translate the following text into {}. Reply with the translation only, without explanations: {}",
            self.target_language, text
        )
    }

    async fn request_translation(
        &self,
        credential: &ApiCredential,
        text: &str,
    ) -> Result<String, TranslationError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: self.instruction(text),
                }],
            }],
        };

        // SECURITY: the key is a query parameter; never log the final URL
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", credential.expose())])
            .json(&request)
            .send()
            .await
            .map_err(TranslationError::http)?;

        let status = response.status();
        let body = response.text().await.map_err(TranslationError::http)?;

        if !status.is_success() {
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        extract_translation(&body)
    }
}

/// First text part of the first candidate, trimmed.
fn extract_translation(body: &str) -> Result<String, TranslationError> {
    let response: GenerateResponse = serde_json::from_str(body)?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(TranslationError::NoCandidates)?;

    let text = candidate
        .content
        .parts
        .into_iter()
        .next()
        .map(|part| part.text.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(TranslationError::EmptyText);
    }

    Ok(text)
}

#[async_trait]
impl ReasonTranslator for GeminiTranslator {
    async fn translate(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let credential = match &self.credential {
            Some(credential) if !credential.is_empty() => credential,
            _ => return text.to_string(),
        };

        match self.request_translation(credential, text).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::debug!(error = %e, "Translation failed, keeping original reason");
                text.to_string()
            }
        }
    }
}
