use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::GenerationClient;
use crate::domain::DomainError;

enum ScriptedReply {
    Text(String),
    Failure(String),
}

/// A [`GenerationClient`] that replays scripted replies in order.
///
/// Every prompt is recorded so tests can assert on what the pipeline sent.
/// When the script runs out, calls fail with a transport error.
pub struct MockGenerationClient {
    replies: Mutex<VecDeque<ScriptedReply>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        for response in responses {
            client.push_response(response);
        }
        client
    }

    /// Sleep before answering, to widen race windows in concurrency tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_response(&self, response: impl Into<String>) {
        self.lock_replies()
            .push_back(ScriptedReply::Text(response.into()));
    }

    pub fn push_failure(&self, message: impl Into<String>) {
        self.lock_replies()
            .push_back(ScriptedReply::Failure(message.into()));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<ScriptedReply>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.lock_replies().pop_front();
        match reply {
            Some(ScriptedReply::Text(text)) => {
                debug!("Mock generation reply: {} chars", text.len());
                Ok(text)
            }
            Some(ScriptedReply::Failure(message)) => Err(DomainError::transport(message)),
            None => Err(DomainError::transport("mock generation script exhausted")),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
