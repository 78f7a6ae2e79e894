/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - translates every batch part
 * - `MockProvider::partial_parts(n)` - returns only the first n parts
 * - `MockProvider::failing()` - always fails with an error
 *
 * Every request is recorded, so tests can assert how many remote calls a
 * scenario actually issued.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{CompletionRequest, Provider};
use crate::translation::batch::BATCH_SEPARATOR;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Translates every part of the batch text, preserving separators
    Working,
    /// Responds with only the first n parts (truncated completion)
    PartialParts(usize),
    /// Always fails with an API error
    Failing,
    /// Returns an empty completion
    Empty,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Recorded requests, shared across clones
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    /// Custom response generator (optional, overrides the behavior)
    custom_response: Option<fn(&CompletionRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that translates every part
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that answers with only the first n batch parts
    pub fn partial_parts(parts: usize) -> Self {
        Self::new(MockBehavior::PartialParts(parts))
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty completions
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&CompletionRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests this provider has received
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// The prompts of every received request, in order
    pub fn received_prompts(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.prompt.clone()).collect()
    }

    /// Extract the separator-joined batch text from a user prompt.
    ///
    /// The prompt builder places the batch text after the first blank line.
    pub fn batch_text(prompt: &str) -> &str {
        prompt
            .split_once("\n\n")
            .map(|(_, text)| text)
            .unwrap_or(prompt)
    }

    /// Translate each batch part, mirroring what a cooperative remote
    /// service produces for a separator-joined request
    pub fn translate_parts(batch_text: &str) -> String {
        batch_text
            .split(BATCH_SEPARATOR)
            .map(|part| format!("[TRANSLATED] {}", part))
            .collect::<Vec<_>>()
            .join(BATCH_SEPARATOR)
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        self.requests.lock().push(request.clone());

        if let Some(generator) = self.custom_response {
            return Ok(generator(&request));
        }

        match self.behavior {
            MockBehavior::Working => Ok(Self::translate_parts(Self::batch_text(&request.prompt))),

            MockBehavior::PartialParts(parts) => {
                let batch = Self::batch_text(&request.prompt);
                let kept: Vec<String> = batch
                    .split(BATCH_SEPARATOR)
                    .take(parts)
                    .map(|part| format!("[TRANSLATED] {}", part))
                    .collect();
                Ok(kept.join(BATCH_SEPARATOR))
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::Empty => Ok(String::new()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
