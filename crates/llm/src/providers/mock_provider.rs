//! Stand-in provider with scripted replies
//!
//! Used by tests and by offline mode. It never pretends to analyse anything:
//! replies are exactly what was scripted, or the offline notice.

use super::CompletionProvider;
use crate::errors::GatewayError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const OFFLINE_REPLY: &str = r#"{"text": "Offline mode: no completion service was contacted. Use `context` to inspect the data that would have been sent."}"#;

#[derive(Debug)]
pub struct MockProvider {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    fallback: String,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Always answers with `reply`
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn offline() -> Self {
        Self::new(OFFLINE_REPLY)
    }

    /// Replies consumed in order; the offline notice once they run out
    pub fn scripted(replies: impl IntoIterator<Item = Result<String, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            fallback: OFFLINE_REPLY.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        let next = self
            .replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}
