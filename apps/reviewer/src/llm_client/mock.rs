//! Test-only mock LLM client.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{ChatMessage, LlmClient, LlmError};

type Responder = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// One recorded call: the system prompt and the final user message.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub history_len: usize,
}

#[derive(Clone)]
pub struct MockLlmClient {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Responder,
    /// Prompts containing any of these fragments fail with an API error.
    fail_on: Vec<String>,
    /// Per-fragment artificial latency, in milliseconds.
    delays: Vec<(String, u64)>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(|prompt: &str| {
                format!("mock response to: {}", prompt.chars().take(40).collect::<String>())
            }),
            fail_on: Vec::new(),
            delays: Vec::new(),
        }
    }
}

impl MockLlmClient {
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing_on(mut self, fragment: impl Into<String>) -> Self {
        self.fail_on.push(fragment.into());
        self
    }

    #[must_use]
    pub fn with_delay_on(mut self, fragment: impl Into<String>, ms: u64) -> Self {
        self.delays.push((fragment.into(), ms));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn respond(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        history_len: usize,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            user: user.to_string(),
            temperature,
            history_len,
        });

        let delay = self
            .delays
            .iter()
            .filter(|(fragment, _)| user.contains(fragment.as_str()))
            .map(|(_, ms)| *ms)
            .max()
            .unwrap_or(0);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.fail_on.iter().any(|f| user.contains(f.as_str())) {
            return Err(LlmError::Api {
                status: 500,
                message: "mock LLM error".to_string(),
            });
        }

        Ok((self.responder)(user))
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        self.respond(system, user, temperature, 1).await
    }

    async fn chat(
        &self,
        system: &str,
        history: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, LlmError> {
        let last = history.last().map(|m| m.content.as_str()).unwrap_or("");
        self.respond(system, last, temperature, history.len()).await
    }
}
