//! Batch sequencer for claim verification.
//!
//! Claims are processed strictly in input order, one at a time:
//! transport, then response mapping, then reason translation. A pause
//! separates consecutive claims to respect the grounding service's rate limit.
//!
//! Per-claim states:
//!
//! ```text
//! NotStarted -> PrimaryAttempted -> Parsed
//!                                -> FallbackAttempted -> Parsed
//!                                                     -> Failed
//!                                -> Failed
//! ```
//!
//! `Failed` always yields a `found = false` outcome; it never aborts the batch.

use std::sync::Arc;
use thiserror::Error;

use claimcheck_core::{parse_outcome, Claim, ClaimBatch, VerificationOutcome, VerificationReport};

use crate::grounding::{CheckError, FallbackTransport, GroundingEndpoint};
use crate::observer::{NullObserver, VerificationEvent, VerificationObserver};
use crate::pacing::{IntervalPacer, Pacer};
use crate::translation::{Passthrough, ReasonTranslator};

/// Errors assembling a sequencer.
#[derive(Error, Debug)]
pub enum SequencerError {
    #[error("Grounding endpoint not configured")]
    EndpointNotConfigured,

    #[error("Transport setup failed: {0}")]
    Transport(#[from] crate::grounding::TransportError),
}

/// Result of running a claims batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchRun {
    /// The batch declared zero claims; no request was issued
    NothingToVerify,

    /// Every claim was processed
    Verified(VerificationReport),
}

impl BatchRun {
    /// The report, if any claim was verified.
    pub fn report(&self) -> Option<&VerificationReport> {
        match self {
            BatchRun::Verified(report) => Some(report),
            BatchRun::NothingToVerify => None,
        }
    }
}

/// Runs the per-claim chain over a batch.
pub struct BatchSequencer {
    transport: FallbackTransport,
    translator: Arc<dyn ReasonTranslator>,
    pacer: Arc<dyn Pacer>,
    observer: Arc<dyn VerificationObserver>,
}

impl BatchSequencer {
    /// Start building a sequencer.
    pub fn builder() -> BatchSequencerBuilder {
        BatchSequencerBuilder::new()
    }

    /// Check one claim: transport, mapping, then translation of the reason.
    ///
    /// Translation cannot fail this call; only transport and parse errors do.
    pub async fn check_claim(&self, claim: &str) -> Result<VerificationOutcome, CheckError> {
        let response = self.transport.check_claim(claim).await?;
        let mut outcome = parse_outcome(claim, &response.body)?;
        outcome.reason = self.translator.translate(&outcome.reason).await;
        Ok(outcome)
    }

    /// Check every claim in order.
    ///
    /// Always returns exactly one outcome per input claim, in input order.
    /// Failed claims are reported as not found.
    pub async fn check_claims(&self, claims: &[Claim]) -> Vec<VerificationOutcome> {
        let total = claims.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, claim) in claims.iter().enumerate() {
            let position = index + 1;
            self.observer.on_event(&VerificationEvent::ClaimStarted {
                position,
                total,
                claim: claim.clone(),
            });

            match self.check_claim(claim).await {
                Ok(outcome) => {
                    self.observer.on_event(&VerificationEvent::ClaimVerified {
                        position,
                        supported: outcome.supported,
                        factuality: outcome.factuality,
                    });
                    outcomes.push(outcome);
                }
                Err(e) => {
                    tracing::warn!(position, total, error = %e, "Claim check failed");
                    self.observer.on_event(&VerificationEvent::ClaimFailed {
                        position,
                        error: e.to_string(),
                    });
                    outcomes.push(VerificationOutcome::not_found(claim.clone()));
                }
            }

            if position < total {
                self.pacer.pause().await;
            }
        }

        outcomes
    }

    /// Verify a claims batch read from the extraction step.
    ///
    /// A batch declaring zero claims short-circuits to
    /// [`BatchRun::NothingToVerify`] without any request.
    pub async fn verify_batch(&self, batch: &ClaimBatch) -> BatchRun {
        let Some(claims) = batch.pending_claims() else {
            tracing::info!("Claims batch is empty, nothing to verify");
            return BatchRun::NothingToVerify;
        };

        let outcomes = self.check_claims(claims).await;
        let report = VerificationReport::new(batch, outcomes);

        self.observer.on_event(&VerificationEvent::BatchFinished {
            summary: report.summary,
        });

        BatchRun::Verified(report)
    }
}

/// Builder for [`BatchSequencer`].
pub struct BatchSequencerBuilder {
    endpoint: Option<Arc<dyn GroundingEndpoint>>,
    translator: Option<Arc<dyn ReasonTranslator>>,
    pacer: Option<Arc<dyn Pacer>>,
    observer: Option<Arc<dyn VerificationObserver>>,
}

impl BatchSequencerBuilder {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            translator: None,
            pacer: None,
            observer: None,
        }
    }

    /// Builder wired to the HTTP services described by `config`.
    ///
    /// Translation uses Gemini when enabled in `config`; without a
    /// translation credential reasons are left untouched.
    #[cfg(feature = "http")]
    pub fn from_config(
        config: &crate::config::RuntimeConfig,
        grounding_key: crate::credentials::ApiCredential,
        translation_key: Option<crate::credentials::ApiCredential>,
    ) -> Result<Self, SequencerError> {
        let endpoint = crate::grounding::JinaEndpoint::new(grounding_key, &config.grounding)?;

        let translator: Arc<dyn ReasonTranslator> = if config.translation.enabled {
            let gemini =
                crate::translation::GeminiTranslator::new(translation_key, &config.translation)?;
            if gemini.is_configured() {
                Arc::new(gemini)
            } else {
                tracing::info!("No translation credential, reasons will not be translated");
                Arc::new(Passthrough)
            }
        } else {
            Arc::new(Passthrough)
        };

        Ok(Self::new()
            .endpoint(Arc::new(endpoint))
            .translator(translator)
            .pacer(Arc::new(IntervalPacer::new(config.pacing.interval))))
    }

    /// Set the grounding endpoint (required).
    pub fn endpoint(mut self, endpoint: Arc<dyn GroundingEndpoint>) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set the reason translator (default: [`Passthrough`]).
    pub fn translator(mut self, translator: Arc<dyn ReasonTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Set the pacer (default: [`IntervalPacer::default`]).
    pub fn pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = Some(pacer);
        self
    }

    /// Set the event observer (default: [`NullObserver`]).
    pub fn observer(mut self, observer: Arc<dyn VerificationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Result<BatchSequencer, SequencerError> {
        let endpoint = self.endpoint.ok_or(SequencerError::EndpointNotConfigured)?;
        let observer = self.observer.unwrap_or_else(|| Arc::new(NullObserver));

        Ok(BatchSequencer {
            transport: FallbackTransport::new(endpoint).with_observer(observer.clone()),
            translator: self.translator.unwrap_or_else(|| Arc::new(Passthrough)),
            pacer: self.pacer.unwrap_or_else(|| Arc::new(IntervalPacer::default())),
            observer,
        })
    }
}

impl Default for BatchSequencerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
