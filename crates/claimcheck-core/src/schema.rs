//! Grounding service response schema and its mapping onto outcomes.
//!
//! The grounding service answers with an object of the form:
//!
//! ```json
//! {
//!   "data": {
//!     "factuality": 0.95,
//!     "result": true,
//!     "reason": "Multiple sources agree ...",
//!     "references": [
//!       { "url": "https://...", "keyQuote": "...", "isSupportive": true }
//!     ]
//!   }
//! }
//! ```
//!
//! Any parseable response counts as "found", whatever its verdict.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::types::VerificationOutcome;

/// Errors decoding a grounding service response body.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed grounding response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Grounding response is empty")]
    EmptyBody,
}

/// Top-level response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GroundingResponse {
    pub data: GroundingResult,
}

/// The service's judgement on a single statement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub factuality: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub result: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub references: Vec<Reference>,
}

/// A source the service consulted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Reference {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    #[serde(default, rename = "keyQuote", deserialize_with = "null_as_default")]
    pub key_quote: String,

    #[serde(default, rename = "isSupportive", deserialize_with = "null_as_default")]
    pub is_supportive: bool,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl GroundingResponse {
    /// Decode a raw response body.
    pub fn from_body(body: &str) -> Result<Self, ParseError> {
        if body.trim().is_empty() {
            return Err(ParseError::EmptyBody);
        }
        Ok(serde_json::from_str(body)?)
    }
}

/// Pick the citation to show for a verdict.
///
/// The first supportive reference wins. Without one, the first reference is
/// used regardless of its flag. An empty list yields no citation.
pub fn select_citation(references: &[Reference]) -> Option<&Reference> {
    references
        .iter()
        .find(|r| r.is_supportive)
        .or_else(|| references.first())
}

/// Build an outcome for `claim` from a decoded response.
///
/// `factuality` is copied as-is; the service is trusted to stay within `[0, 1]`.
pub fn map_outcome(claim: impl Into<String>, response: GroundingResponse) -> VerificationOutcome {
    let result = response.data;
    let (source_url, key_quote) = match select_citation(&result.references) {
        Some(reference) => (
            Some(reference.url.clone()).filter(|u| !u.is_empty()),
            Some(reference.key_quote.clone()).filter(|q| !q.is_empty()),
        ),
        None => (None, None),
    };

    VerificationOutcome {
        claim: claim.into(),
        found: true,
        supported: result.result,
        factuality: result.factuality,
        reason: result.reason,
        source_url,
        key_quote,
    }
}

/// Decode `body` and map it to an outcome for `claim`.
pub fn parse_outcome(claim: impl Into<String>, body: &str) -> Result<VerificationOutcome, ParseError> {
    let response = GroundingResponse::from_body(body)?;
    Ok(map_outcome(claim, response))
}
