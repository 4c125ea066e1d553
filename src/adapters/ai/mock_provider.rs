//! Mock AI provider for tests and offline development.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse};

/// Scriptable provider.
///
/// Queued responses are returned in order; with an empty queue the
/// last user message is echoed back, which makes it an identity
/// paraphraser. A queued error or delay fires on the next call.
pub struct MockAIProvider {
    responses: Mutex<VecDeque<String>>,
    next_error: Mutex<Option<AIError>>,
    delay: Mutex<Option<Duration>>,
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            next_error: Mutex::new(None),
            delay: Mutex::new(None),
        }
    }

    pub fn with_responses(responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let provider = Self::new();
        {
            let mut queue = provider.responses.lock().unwrap();
            queue.extend(responses.into_iter().map(Into::into));
        }
        provider
    }

    /// Queues an error for the next call only.
    pub fn fail_next(&self, error: AIError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Delays every call, for exercising caller-side timeouts.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(error);
        }

        let scripted = self.responses.lock().unwrap().pop_front();
        let content = scripted.unwrap_or_else(|| {
            request
                .messages
                .iter()
                .rev()
                .find(|m| matches!(m.role, crate::ports::MessageRole::User))
                .map(|m| m.content.clone())
                .unwrap_or_default()
        });

        Ok(CompletionResponse {
            content,
            model: "mock".to_string(),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Message;

    #[tokio::test]
    async fn scripted_responses_come_back_in_order() {
        let provider = MockAIProvider::with_responses(["first", "second"]);
        let request = CompletionRequest::new(vec![Message::user("hi")]);

        let a = provider.complete(request.clone()).await.unwrap();
        let b = provider.complete(request).await.unwrap();
        assert_eq!(a.content, "first");
        assert_eq!(b.content, "second");
    }

    #[tokio::test]
    async fn empty_queue_echoes_the_user_message() {
        let provider = MockAIProvider::new();
        let request = CompletionRequest::new(vec![
            Message::system("rewrite"),
            Message::user("Could you tell me your age?"),
        ]);

        let response = provider.complete(request).await.unwrap();
        assert_eq!(response.content, "Could you tell me your age?");
    }

    #[tokio::test]
    async fn queued_error_fires_once() {
        let provider = MockAIProvider::new();
        provider.fail_next(AIError::RateLimited);
        let request = CompletionRequest::new(vec![Message::user("hi")]);

        assert!(provider.complete(request.clone()).await.is_err());
        assert!(provider.complete(request).await.is_ok());
    }
}
