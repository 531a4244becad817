//! Summary aggregation over verification outcomes.
//!
//! Every claim that is not confirmed counts as a potential hallucination,
//! including claims the pipeline failed to check at all.

use serde::{Deserialize, Serialize};

use crate::types::VerificationOutcome;

/// Counts used for the hallucination-rate report.
///
/// Invariants:
/// - `claims_found + claims_not_found == total_claims`
/// - `potential_hallucinations == claims_not_found`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_claims: usize,
    pub claims_found: usize,
    pub claims_not_found: usize,
    pub potential_hallucinations: usize,
}

impl Summary {
    /// Share of potential hallucinations, in percent.
    ///
    /// `None` for an empty batch.
    pub fn hallucination_rate(&self) -> Option<f64> {
        percentage(self.potential_hallucinations, self.total_claims)
    }

    /// Share of confirmed claims, in percent.
    ///
    /// `None` for an empty batch.
    pub fn confirmed_rate(&self) -> Option<f64> {
        percentage(self.claims_found, self.total_claims)
    }
}

fn percentage(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64 * 100.0)
    }
}

/// Reduce outcomes into a [`Summary`].
pub fn summarize(outcomes: &[VerificationOutcome]) -> Summary {
    let mut summary = Summary {
        total_claims: outcomes.len(),
        ..Default::default()
    };

    for outcome in outcomes {
        if outcome.is_confirmed() {
            summary.claims_found += 1;
        } else {
            summary.claims_not_found += 1;
            summary.potential_hallucinations += 1;
        }
    }

    summary
}
