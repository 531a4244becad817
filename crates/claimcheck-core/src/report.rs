//! Full verification report for one batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::batch::ClaimBatch;
use crate::summary::{summarize, Summary};
use crate::types::{Claim, VerificationOutcome};

/// Everything a presentation layer needs after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// When verification finished
    pub checked_at: DateTime<Utc>,

    #[serde(default)]
    pub query: String,

    pub response: String,

    pub claims: Vec<Claim>,

    /// One outcome per claim, in claim order
    pub outcomes: Vec<VerificationOutcome>,

    pub summary: Summary,
}

impl VerificationReport {
    /// Assemble a report from a batch and its outcomes.
    pub fn new(batch: &ClaimBatch, outcomes: Vec<VerificationOutcome>) -> Self {
        let summary = summarize(&outcomes);
        Self {
            checked_at: Utc::now(),
            query: batch.query.clone(),
            response: batch.response.clone(),
            claims: batch.claims.clone(),
            outcomes,
            summary,
        }
    }
}
