//! Diagnostic event channel for the pipeline.
//!
//! Pipeline components never write to the console. Progress and per-claim
//! failures are reported as [`VerificationEvent`]s to an observer the caller
//! supplies; ignoring them is always safe.

use claimcheck_core::Summary;

/// Something that happened while verifying a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationEvent {
    /// A claim is about to be checked (`position` is 1-based)
    ClaimStarted {
        position: usize,
        total: usize,
        claim: String,
    },

    /// The primary request was rejected and the fallback mode is being tried
    FallbackTriggered { claim: String, status: u16 },

    /// A claim received a readable verdict
    ClaimVerified {
        position: usize,
        supported: bool,
        factuality: f64,
    },

    /// A claim could not be checked; it will be reported as not found
    ClaimFailed { position: usize, error: String },

    /// All claims of a batch have been processed
    BatchFinished { summary: Summary },
}

/// Receives pipeline events.
pub trait VerificationObserver: Send + Sync {
    fn on_event(&self, event: &VerificationEvent);
}

impl<F> VerificationObserver for F
where
    F: Fn(&VerificationEvent) + Send + Sync,
{
    fn on_event(&self, event: &VerificationEvent) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl VerificationObserver for NullObserver {
    fn on_event(&self, _event: &VerificationEvent) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl VerificationObserver for TracingObserver {
    fn on_event(&self, event: &VerificationEvent) {
        match event {
            VerificationEvent::ClaimStarted { position, total, claim } => {
                tracing::info!(position, total, claim = %claim, "Checking claim");
            }
            // Logged at warn level where they happen
            VerificationEvent::FallbackTriggered { .. } | VerificationEvent::ClaimFailed { .. } => {}
            VerificationEvent::ClaimVerified {
                position,
                supported,
                factuality,
            } => {
                tracing::debug!(position, supported, factuality, "Claim verified");
            }
            VerificationEvent::BatchFinished { summary } => {
                tracing::info!(
                    total = summary.total_claims,
                    found = summary.claims_found,
                    not_found = summary.claims_not_found,
                    "Batch verification finished"
                );
            }
        }
    }
}
