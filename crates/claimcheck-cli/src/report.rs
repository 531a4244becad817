//! Plain-text rendering of a verification report.

use std::fmt::Write;

use claimcheck_core::{Summary, Verdict, VerificationOutcome, VerificationReport};

const RULE: &str = "==========================================";
const THIN_RULE: &str = "------------------------------------------";

/// Render the full report: response, per-claim results, then the summary.
pub fn render_text(report: &VerificationReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "VERIFICATION RESULTS");
    let _ = writeln!(out, "{}", RULE);
    if !report.query.is_empty() {
        let _ = writeln!(out, "Query:    {}", report.query);
    }
    let _ = writeln!(out, "Response: {}", report.response);
    let _ = writeln!(out, "{}", THIN_RULE);

    for (index, outcome) in report.outcomes.iter().enumerate() {
        render_outcome(&mut out, index + 1, outcome);
    }

    out.push('\n');
    render_summary(&mut out, &report.summary);
    out
}

fn render_outcome(out: &mut String, position: usize, outcome: &VerificationOutcome) {
    let _ = writeln!(out, "\n[{}] {}", position, outcome.claim);

    let verdict = outcome.verdict();
    match verdict {
        Verdict::Unverified => {
            let _ = writeln!(out, "    UNVERIFIED: could not be checked");
        }
        Verdict::Confirmed | Verdict::Refuted => {
            let _ = writeln!(
                out,
                "    {} (factuality: {:.0}%)",
                verdict.to_string().to_uppercase(),
                outcome.factuality * 100.0
            );
        }
    }

    if !outcome.reason.is_empty() {
        let _ = writeln!(out, "    Reason: {}", outcome.reason);
    }
    if let Some(url) = &outcome.source_url {
        let _ = writeln!(out, "    Source: {}", url);
    }
    if let Some(quote) = &outcome.key_quote {
        let _ = writeln!(out, "    Quote:  \"{}\"", quote);
    }
}

fn render_summary(out: &mut String, summary: &Summary) {
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Total claims:             {}", summary.total_claims);
    match summary.confirmed_rate() {
        Some(rate) => {
            let _ = writeln!(out, "Found:                    {} ({:.1}%)", summary.claims_found, rate);
        }
        None => {
            let _ = writeln!(out, "Found:                    {}", summary.claims_found);
        }
    }
    let _ = writeln!(out, "Not found:                {}", summary.claims_not_found);
    match summary.hallucination_rate() {
        Some(rate) => {
            let _ = writeln!(
                out,
                "Potential hallucinations: {} ({:.1}%)",
                summary.potential_hallucinations, rate
            );
        }
        None => {
            let _ = writeln!(
                out,
                "Potential hallucinations: {}",
                summary.potential_hallucinations
            );
        }
    }
    let _ = writeln!(out, "{}", RULE);
}
