//! Read contract for the claims batch file produced by claim extraction.
//!
//! The extraction service writes one JSON object per run:
//!
//! ```json
//! {
//!   "timestamp": "2025-03-01T12:00:00.000000",
//!   "query": "Capital of Russia?",
//!   "response": "Moscow is the capital of Russia. ...",
//!   "claims": ["Moscow is the capital of Russia", "..."],
//!   "count": 2
//! }
//! ```
//!
//! This crate only reads it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::Claim;

/// Errors reading a claims batch.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Failed to read claims file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse claims file: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// The ordered claims derived from a single AI response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimBatch {
    /// When extraction ran (opaque, as written by the producer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// The user query that produced the response, if any
    #[serde(default)]
    pub query: String,

    /// The AI-generated text the claims were extracted from
    #[serde(default)]
    pub response: String,

    /// Claims in extraction order
    #[serde(default)]
    pub claims: Vec<Claim>,

    /// Number of claims, as declared by the producer
    pub count: usize,
}

impl ClaimBatch {
    /// Build a batch in memory; `count` follows the claim list.
    pub fn new(query: impl Into<String>, response: impl Into<String>, claims: Vec<Claim>) -> Self {
        Self {
            timestamp: None,
            query: query.into(),
            response: response.into(),
            count: claims.len(),
            claims,
        }
    }

    /// Parse a batch from JSON text.
    pub fn from_json(json: &str) -> Result<Self, BatchError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a batch from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BatchError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Claims to verify, or `None` when the producer declared an empty batch.
    ///
    /// The declared `count` is trusted for this decision. A disagreement
    /// between `count` and the claim list is logged and the list is used.
    pub fn pending_claims(&self) -> Option<&[Claim]> {
        if self.count == 0 {
            return None;
        }

        if self.count != self.claims.len() {
            tracing::warn!(
                declared = self.count,
                actual = self.claims.len(),
                "Claims batch count does not match its claim list"
            );
        }

        Some(&self.claims)
    }
}
