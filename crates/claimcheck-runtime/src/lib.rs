//! # claimcheck-runtime
//!
//! Networked verification of extracted claims.
//!
//! `claimcheck-core` owns the data model and the pure mapping rules. This
//! crate performs the I/O around them:
//!
//! - [`grounding`]: requests to the grounding service, with the body-to-path
//!   fallback on `422`
//! - [`translation`]: best-effort translation of verdict reasons
//! - [`pacing`]: the pause between consecutive claims
//! - [`sequencer`]: runs a whole batch, one claim at a time
//!
//! Credentials are injected at construction time (see [`credentials`]); no
//! component reads the environment on its own.
//!
//! ## Example
//!
//! ```rust,ignore
//! use claimcheck_core::ClaimBatch;
//! use claimcheck_runtime::{ApiCredential, BatchRun, BatchSequencerBuilder, RuntimeConfig};
//!
//! let config = RuntimeConfig::default();
//! let jina = ApiCredential::from_env("JINA_API_KEY", "Jina API key")?;
//! let gemini = ApiCredential::from_env_optional("GEMINI_API_KEY", "Gemini API key");
//!
//! let sequencer = BatchSequencerBuilder::from_config(&config, jina, gemini)?.build()?;
//! let batch = ClaimBatch::from_json_file("claims.json")?;
//!
//! if let BatchRun::Verified(report) = sequencer.verify_batch(&batch).await {
//!     println!("{:?}", report.summary.hallucination_rate());
//! }
//! ```

pub mod config;
pub mod credentials;
pub mod grounding;
pub mod observer;
pub mod pacing;
pub mod sequencer;
pub mod translation;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, GroundingConfig, PacingConfig, RuntimeConfig, TranslationConfig};
pub use credentials::{
    ApiCredential, CredentialError, CredentialSource, GROUNDING_API_KEY_ENV,
    TRANSLATION_API_KEY_ENV,
};
pub use grounding::{
    CheckError, FallbackTransport, GroundingEndpoint, RawResponse, TransportError, TransportMode,
};
#[cfg(feature = "http")]
pub use grounding::JinaEndpoint;
pub use observer::{NullObserver, TracingObserver, VerificationEvent, VerificationObserver};
pub use pacing::{IntervalPacer, NoPacing, Pacer};
pub use sequencer::{BatchRun, BatchSequencer, BatchSequencerBuilder, SequencerError};
#[cfg(feature = "http")]
pub use translation::GeminiTranslator;
pub use translation::{Passthrough, ReasonTranslator};
