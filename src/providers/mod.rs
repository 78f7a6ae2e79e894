/*!
 * Provider implementations for the remote translation capability.
 *
 * This module contains client implementations for text-completion services:
 * - OpenAI-compatible chat completion APIs (hosted or local)
 * - A mock provider for tests
 *
 * The bit-exact wire format is provider-specific and hidden behind the
 * `Provider` trait; the core only sees a completion request and the
 * completion text.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One text-completion request, provider-agnostic
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,

    /// Fixed system instruction
    pub system: String,

    /// User prompt (difficulty constraints plus separator-joined batch text)
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum output length in tokens
    pub max_tokens: u32,

    /// API credential, re-read from the store before every call so rotation
    /// mid-session is picked up
    pub api_key: String,
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably by the translation client.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The first completion's text, or an error
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;

    /// Human-readable provider name for logs
    fn name(&self) -> &str;
}

pub mod mock;
pub mod openai;
