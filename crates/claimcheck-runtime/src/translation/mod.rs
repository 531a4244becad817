//! Best-effort translation of verdict reasons.
//!
//! Translation never fails the pipeline: [`ReasonTranslator::translate`] is
//! infallible and implementations return the original text whenever anything
//! goes wrong.

use async_trait::async_trait;

#[cfg(feature = "http")]
mod gemini;

#[cfg(feature = "http")]
pub use gemini::GeminiTranslator;

/// Rewrites a reason into the target language, or returns it unchanged.
#[async_trait]
pub trait ReasonTranslator: Send + Sync {
    async fn translate(&self, text: &str) -> String;
}

/// Leaves every text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

#[async_trait]
impl ReasonTranslator for Passthrough {
    async fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passthrough_is_identity() {
        assert_eq!(Passthrough.translate("Supported by NASA.").await, "Supported by NASA.");
        assert_eq!(Passthrough.translate("").await, "");
    }
}
