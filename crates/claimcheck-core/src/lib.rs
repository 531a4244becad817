//! # claimcheck-core
//!
//! Deterministic half of the claim verification pipeline.
//!
//! This crate never touches the network. It provides:
//! - The data model shared by every stage ([`Claim`], [`VerificationOutcome`], [`ClaimBatch`])
//! - Decoding of grounding service responses and the citation selection policy
//! - Summary aggregation used for the hallucination-rate report
//!
//! The networked stages (transport, translation, sequencing) live in
//! `claimcheck-runtime`.
//!
//! ## Example
//!
//! ```rust
//! use claimcheck_core::{parse_outcome, summarize};
//!
//! let body = r#"{"data": {"factuality": 0.95, "result": true, "reason": "ok", "references": []}}"#;
//! let outcome = parse_outcome("Earth is round", body).unwrap();
//! let summary = summarize(&[outcome]);
//!
//! assert_eq!(summary.claims_found, 1);
//! assert_eq!(summary.hallucination_rate(), Some(0.0));
//! ```

pub mod batch;
pub mod report;
pub mod schema;
pub mod summary;
pub mod types;

// Re-export main types at crate root
pub use batch::{BatchError, ClaimBatch};
pub use report::VerificationReport;
pub use schema::{
    map_outcome, parse_outcome, select_citation, GroundingResponse, GroundingResult,
    ParseError, Reference,
};
pub use summary::{summarize, Summary};
pub use types::{Claim, Verdict, VerificationOutcome};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_mapping_and_summary() {
        let bodies = [
            ("Earth is round", r#"{"data": {"factuality": 0.95, "result": true, "reason": "r1", "references": []}}"#),
            ("Moon is made of cheese", r#"{"data": {"factuality": 0.10, "result": false, "reason": "r2", "references": []}}"#),
        ];

        let outcomes: Vec<_> = bodies
            .iter()
            .map(|(claim, body)| parse_outcome(*claim, body).unwrap())
            .collect();
        let summary = summarize(&outcomes);

        assert_eq!(summary.total_claims, 2);
        assert_eq!(summary.claims_found, 1);
        assert_eq!(summary.claims_not_found, 1);
        assert_eq!(summary.potential_hallucinations, 1);
        assert_eq!(summary.hallucination_rate(), Some(50.0));
    }
}
