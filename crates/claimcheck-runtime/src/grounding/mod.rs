//! Grounding service transport.
//!
//! A claim is checked with one of two request shapes:
//! - [`TransportMode::Body`]: the claim travels in a JSON body. This is the
//!   primary mode because it preserves non-ASCII text exactly.
//! - [`TransportMode::Path`]: the claim is percent-escaped into the request
//!   path. Only used after the service rejects the body form with
//!   `422 Unprocessable Entity`.
//!
//! [`GroundingEndpoint`] performs a single request in a given mode;
//! [`FallbackTransport`] owns the rule that chains them.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use claimcheck_core::ParseError;

mod fallback;
#[cfg(feature = "http")]
mod jina;

pub use fallback::FallbackTransport;
#[cfg(feature = "http")]
pub use jina::JinaEndpoint;

/// Status that triggers the fallback to [`TransportMode::Path`].
pub const UNPROCESSABLE_ENTITY: u16 = 422;

/// How a claim is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    /// POST with a JSON body
    Body,
    /// GET with the claim in the path
    Path,
}

impl TransportMode {
    /// HTTP method used by this mode.
    pub fn method(&self) -> &'static str {
        match self {
            TransportMode::Body => "POST",
            TransportMode::Path => "GET",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// Status and body of a completed request, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network-level failures. No status was received.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Why a single claim could not be checked.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("{mode} request failed: {source}")]
    Transport {
        mode: TransportMode,
        #[source]
        source: TransportError,
    },

    #[error("Grounding service returned status {status}: {body}")]
    Protocol { status: u16, body: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A grounding service reachable over some transport.
#[async_trait]
pub trait GroundingEndpoint: Send + Sync {
    /// Send one request for `claim` in the given mode.
    ///
    /// Any status is returned as a [`RawResponse`]; only failures to obtain a
    /// status are errors.
    async fn send(&self, claim: &str, mode: TransportMode) -> Result<RawResponse, TransportError>;

    /// Endpoint name for logs.
    fn name(&self) -> &str;
}
