//! Mock AI Provider for testing.
//!
//! Configurable mock implementation of the AIProvider port, allowing tests
//! to run without calling real AI APIs.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Error injection for resilience testing
//! - Call tracking for verification

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// A configured mock reply.
#[derive(Debug, Clone)]
enum MockReply {
    Success(String),
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

/// Mock AI provider for testing.
///
/// Replies are consumed in configuration order; when the queue is empty a
/// generic reply is returned so multi-turn tests don't have to script
/// every exchange.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    info: ProviderInfo,
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
        }
    }

    /// Adds a successful reply to the queue.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Success(content.into()));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Error(error));
        self
    }

    /// Returns the number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns the recorded requests.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.calls.lock().unwrap().push(request);

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Success(content)) => Ok(CompletionResponse {
                content,
                model: self.info.model.clone(),
            }),
            Some(MockReply::Error(err)) => Err(err.into()),
            None => Ok(CompletionResponse {
                content: "Mock svar".to_string(),
                model: self.info.model.clone(),
            }),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_scripted_replies_in_order() {
        let provider = MockAIProvider::new().with_reply("første").with_reply("andet");

        let r1 = provider.complete(CompletionRequest::new()).await.unwrap();
        let r2 = provider.complete(CompletionRequest::new()).await.unwrap();

        assert_eq!(r1.content, "første");
        assert_eq!(r2.content, "andet");
    }

    #[tokio::test]
    async fn falls_back_to_generic_reply_when_queue_empty() {
        let provider = MockAIProvider::new();
        let response = provider.complete(CompletionRequest::new()).await.unwrap();
        assert_eq!(response.content, "Mock svar");
    }

    #[tokio::test]
    async fn injects_configured_error() {
        let provider = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "nede".to_string(),
        });

        let result = provider.complete(CompletionRequest::new()).await;
        assert!(matches!(result, Err(AIError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn records_every_call() {
        let provider = MockAIProvider::new();
        let request = CompletionRequest::new().with_system_prompt("ramme");

        provider.complete(request).await.unwrap();
        provider.complete(CompletionRequest::new()).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(
            provider.calls()[0].system_prompt.as_deref(),
            Some("ramme")
        );
    }
}
