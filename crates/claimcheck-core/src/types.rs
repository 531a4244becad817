//! Shared data model for claim verification.

use serde::{Deserialize, Serialize};

/// An atomic factual statement extracted from AI-generated text.
///
/// Claims are opaque text. They are identified only by their position in
/// the batch they came from, so duplicates are allowed and each one is
/// verified independently.
pub type Claim = String;

/// Per-claim result of running the verification pipeline.
///
/// `found == false` means the grounding service could not be consulted or
/// its answer could not be read. In that case `supported` is always false and
/// `factuality` carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// The claim text, verbatim
    pub claim: Claim,

    /// Whether the grounding service produced a readable verdict
    pub found: bool,

    /// The service's verdict on the claim
    pub supported: bool,

    /// Continuous factuality score in `[0, 1]`, as reported by the service
    #[serde(default)]
    pub factuality: f64,

    /// Free-text justification (possibly translated)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// URL of the selected citation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Supporting quote from the selected citation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_quote: Option<String>,
}

impl VerificationOutcome {
    /// Outcome for a claim that could not be checked at all.
    pub fn not_found(claim: impl Into<Claim>) -> Self {
        Self {
            claim: claim.into(),
            found: false,
            supported: false,
            factuality: 0.0,
            reason: String::new(),
            source_url: None,
            key_quote: None,
        }
    }

    /// True when the service found the claim and judged it supported.
    pub fn is_confirmed(&self) -> bool {
        self.found && self.supported
    }

    /// Classify the outcome for reporting.
    pub fn verdict(&self) -> Verdict {
        match (self.found, self.supported) {
            (true, true) => Verdict::Confirmed,
            (true, false) => Verdict::Refuted,
            (false, _) => Verdict::Unverified,
        }
    }
}

/// Three-way classification of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Found and supported
    Confirmed,
    /// Found but not supported
    Refuted,
    /// The claim could not be checked
    Unverified,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Confirmed => write!(f, "confirmed"),
            Verdict::Refuted => write!(f, "refuted"),
            Verdict::Unverified => write!(f, "unverified"),
        }
    }
}
