//! Scripted generator for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::{GenerationError, Result};
use crate::generator::{GenerationSettings, Generator};

/// Replays queued responses in order and records every prompt it was sent.
#[derive(Debug, Default)]
pub struct FakeGenerator {
    responses: Mutex<VecDeque<Result<String>>>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator whose next answer is `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new().then_reply(text)
    }

    pub fn failing(err: GenerationError) -> Self {
        Self::new().then_fail(err)
    }

    pub fn then_reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    pub fn then_fail(self, err: GenerationError) -> Self {
        self.push(Err(err));
        self
    }

    /// Wait this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    fn push(&self, response: Result<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    fn name(&self) -> &str {
        "fake"
    }

    async fn generate(&self, prompt: &str, _settings: &GenerationSettings) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .responses
            .lock()
            .map_err(|_| GenerationError::Transport("fake generator poisoned".to_string()))?
            .pop_front();
        next.unwrap_or(Err(GenerationError::EmptyResponse))
    }
}
