//! Primary/fallback request rule.

use std::sync::Arc;

use super::{CheckError, GroundingEndpoint, RawResponse, TransportMode, UNPROCESSABLE_ENTITY};
use crate::observer::{NullObserver, VerificationEvent, VerificationObserver};

/// Checks a claim in body mode, falling back to path mode on `422`.
///
/// The two modes are never tried speculatively: path mode runs only after an
/// explicit `422` from body mode. Any other non-success status is final.
pub struct FallbackTransport {
    endpoint: Arc<dyn GroundingEndpoint>,
    observer: Arc<dyn VerificationObserver>,
}

impl FallbackTransport {
    pub fn new(endpoint: Arc<dyn GroundingEndpoint>) -> Self {
        Self {
            endpoint,
            observer: Arc::new(NullObserver),
        }
    }

    /// Report fallbacks to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn VerificationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Obtain a successful raw response for `claim`.
    pub async fn check_claim(&self, claim: &str) -> Result<RawResponse, CheckError> {
        let mut response = self.attempt(claim, TransportMode::Body).await?;

        if response.status == UNPROCESSABLE_ENTITY {
            tracing::warn!(
                endpoint = self.endpoint.name(),
                status = response.status,
                "Body request rejected, retrying with claim in path"
            );
            self.observer.on_event(&VerificationEvent::FallbackTriggered {
                claim: claim.to_string(),
                status: response.status,
            });
            response = self.attempt(claim, TransportMode::Path).await?;
        }

        if !response.is_success() {
            return Err(CheckError::Protocol {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response)
    }

    async fn attempt(&self, claim: &str, mode: TransportMode) -> Result<RawResponse, CheckError> {
        tracing::debug!(endpoint = self.endpoint.name(), %mode, "Sending grounding request");
        self.endpoint
            .send(claim, mode)
            .await
            .map_err(|source| CheckError::Transport { mode, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grounding::TransportError;
    use crate::test_support::{RecordingObserver, ScriptedEndpoint};
    use std::time::Duration;

    #[tokio::test]
    async fn test_success_uses_body_mode_only() {
        let endpoint = Arc::new(ScriptedEndpoint::new(|_, _| Ok(RawResponse::new(200, "{}"))));
        let transport = FallbackTransport::new(endpoint.clone());

        let response = transport.check_claim("Earth is round").await.unwrap();
        assert_eq!(response.body, "{}");
        assert_eq!(endpoint.calls(), vec![("Earth is round".to_string(), TransportMode::Body)]);
    }

    #[tokio::test]
    async fn test_422_triggers_path_mode_for_same_claim() {
        let endpoint = Arc::new(ScriptedEndpoint::new(|_, mode| match mode {
            TransportMode::Body => Ok(RawResponse::new(422, "unprocessable")),
            TransportMode::Path => Ok(RawResponse::new(200, "ok")),
        }));
        let observer = Arc::new(RecordingObserver::default());
        let transport = FallbackTransport::new(endpoint.clone()).with_observer(observer.clone());

        let response = transport.check_claim("Moon is made of cheese").await.unwrap();
        assert_eq!(response.body, "ok");
        assert_eq!(
            endpoint.calls(),
            vec![
                ("Moon is made of cheese".to_string(), TransportMode::Body),
                ("Moon is made of cheese".to_string(), TransportMode::Path),
            ]
        );
        assert_eq!(
            observer.events(),
            vec![VerificationEvent::FallbackTriggered {
                claim: "Moon is made of cheese".to_string(),
                status: 422,
            }]
        );
    }

    #[tokio::test]
    async fn test_other_rejections_are_terminal() {
        for status in [400u16, 401, 429, 500, 503] {
            let endpoint = Arc::new(ScriptedEndpoint::new(move |_, _| {
                Ok(RawResponse::new(status, "nope"))
            }));
            let transport = FallbackTransport::new(endpoint.clone());

            let err = transport.check_claim("x").await.unwrap_err();
            assert!(
                matches!(err, CheckError::Protocol { status: s, ref body } if s == status && body == "nope")
            );
            assert_eq!(endpoint.calls().len(), 1, "no fallback expected for {}", status);
        }
    }

    #[tokio::test]
    async fn test_fallback_rejection_is_terminal() {
        let endpoint = Arc::new(ScriptedEndpoint::new(|_, mode| match mode {
            TransportMode::Body => Ok(RawResponse::new(422, "")),
            TransportMode::Path => Ok(RawResponse::new(422, "still bad")),
        }));
        let transport = FallbackTransport::new(endpoint.clone());

        let err = transport.check_claim("x").await.unwrap_err();
        assert!(matches!(err, CheckError::Protocol { status: 422, .. }));
        assert_eq!(endpoint.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_network_failure_skips_fallback() {
        let endpoint = Arc::new(ScriptedEndpoint::new(|_, _| {
            Err(TransportError::Timeout(Duration::from_secs(60)))
        }));
        let transport = FallbackTransport::new(endpoint.clone());

        let err = transport.check_claim("x").await.unwrap_err();
        assert!(matches!(
            err,
            CheckError::Transport {
                mode: TransportMode::Body,
                source: TransportError::Timeout(_)
            }
        ));
        assert_eq!(endpoint.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_network_failure_during_fallback() {
        let endpoint = Arc::new(ScriptedEndpoint::new(|_, mode| match mode {
            TransportMode::Body => Ok(RawResponse::new(422, "")),
            TransportMode::Path => Err(TransportError::HttpError("connection reset".into())),
        }));
        let transport = FallbackTransport::new(endpoint);

        let err = transport.check_claim("x").await.unwrap_err();
        assert!(matches!(err, CheckError::Transport { mode: TransportMode::Path, .. }));
    }
}
