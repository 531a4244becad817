//! Test doubles for the pipeline seams.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::grounding::{GroundingEndpoint, RawResponse, TransportError, TransportMode};
use crate::observer::{VerificationEvent, VerificationObserver};
use crate::pacing::Pacer;
use crate::translation::ReasonTranslator;

type Script = Box<dyn Fn(&str, TransportMode) -> Result<RawResponse, TransportError> + Send + Sync>;

/// Endpoint answering from a closure and recording every request.
pub struct ScriptedEndpoint {
    script: Script,
    calls: Mutex<Vec<(String, TransportMode)>>,
}

impl ScriptedEndpoint {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&str, TransportMode) -> Result<RawResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, TransportMode)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl GroundingEndpoint for ScriptedEndpoint {
    async fn send(&self, claim: &str, mode: TransportMode) -> Result<RawResponse, TransportError> {
        self.calls.lock().push((claim.to_string(), mode));
        (self.script)(claim, mode)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Grounding body with the given verdict and no references.
pub fn verdict_body(result: bool, factuality: f64, reason: &str) -> String {
    serde_json::json!({
        "data": {
            "factuality": factuality,
            "result": result,
            "reason": reason,
            "references": []
        }
    })
    .to_string()
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<VerificationEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<VerificationEvent> {
        self.events.lock().clone()
    }
}

impl VerificationObserver for RecordingObserver {
    fn on_event(&self, event: &VerificationEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Counts pauses without waiting.
#[derive(Default)]
pub struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

/// Prefixes every non-empty text, recording what it was asked to translate.
#[derive(Default)]
pub struct PrefixTranslator {
    seen: Mutex<Vec<String>>,
}

impl PrefixTranslator {
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl ReasonTranslator for PrefixTranslator {
    async fn translate(&self, text: &str) -> String {
        self.seen.lock().push(text.to_string());
        if text.is_empty() {
            return String::new();
        }
        format!("[translated] {}", text)
    }
}

/// Translator whose backend is unreachable: records each text and, as the
/// translation contract requires, hands it back unchanged.
#[derive(Default)]
pub struct UnavailableTranslator {
    attempts: Mutex<Vec<String>>,
}

impl UnavailableTranslator {
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().clone()
    }
}

#[async_trait]
impl ReasonTranslator for UnavailableTranslator {
    async fn translate(&self, text: &str) -> String {
        self.attempts.lock().push(text.to_string());
        text.to_string()
    }
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer {
    bytes: std::sync::Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    /// Run `f` with a plain-text subscriber writing into this buffer.
    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn lines_with(&self, needle: &str) -> usize {
        String::from_utf8_lossy(&self.bytes.lock())
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
