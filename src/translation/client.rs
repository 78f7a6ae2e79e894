/*!
 * Cache-through translation client.
 *
 * Sits between the orchestrator and the provider: checks the cache, re-reads
 * the API credential on every miss, builds the difficulty-conditioned
 * prompt, and validates the completion. Failures never populate the cache,
 * so a retry on the same input attempts the network call again.
 */

use std::sync::Arc;

use log::{debug, error};

use crate::app_config::{CredentialStore, TranslationConfig};
use crate::errors::TranslationError;
use crate::providers::{CompletionRequest, Provider};
use crate::session::DifficultyLevel;
use crate::translation::cache::TranslationCache;
use crate::translation::prompts::{PromptBuilder, SYSTEM_INSTRUCTION};

/// Translation client combining cache, credential store, and provider
pub struct TranslationClient {
    /// Provider implementation
    provider: Arc<dyn Provider>,

    /// Credential collaborator, consulted before every remote call
    credentials: Arc<dyn CredentialStore>,

    /// Session-scoped cache
    cache: TranslationCache,

    /// Model, language, and sampling settings
    config: TranslationConfig,
}

impl TranslationClient {
    /// Create a new translation client
    pub fn new(
        provider: Arc<dyn Provider>,
        credentials: Arc<dyn CredentialStore>,
        cache: TranslationCache,
        config: TranslationConfig,
    ) -> Self {
        Self {
            provider,
            credentials,
            cache,
            config,
        }
    }

    /// The cache this client populates
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Translate a text at the given difficulty.
    ///
    /// A cache hit returns immediately with no network call and no side
    /// effects. On a miss the credential is re-read from the store (never
    /// cached across calls, so rotation mid-session is tolerated); a missing
    /// credential short-circuits before any network traffic.
    pub async fn translate(
        &self,
        text: &str,
        difficulty: DifficultyLevel,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        if let Some(cached) = self.cache.get(difficulty, text) {
            return Ok(cached);
        }

        let api_key = self
            .credentials
            .get_credential()
            .await
            .filter(|key| !key.is_empty())
            .ok_or(TranslationError::MissingCredential)?;

        let prompt = PromptBuilder::new(&self.config.target_language, difficulty).build(text);

        let request = CompletionRequest {
            model: self.config.model.clone(),
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            api_key,
        };

        debug!(
            "Requesting translation from {} ({} chars, difficulty {})",
            self.provider.name(),
            text.len(),
            difficulty
        );

        let completion = self.provider.complete(request).await?;

        let translated = completion.trim().to_string();
        if translated.is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        self.cache.store(difficulty, text, &translated);

        Ok(translated)
    }

    /// Per-call fallback variant: any translation failure is reported and
    /// the original input is returned unchanged. The cache stays untouched,
    /// so a later identical call issues the network call again.
    pub async fn translate_or_original(&self, text: &str, difficulty: DifficultyLevel) -> String {
        match self.translate(text, difficulty).await {
            Ok(translated) => translated,
            Err(e) => {
                error!("Translation failed, keeping original text: {}", e);
                text.to_string()
            }
        }
    }
}
