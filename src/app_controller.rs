/*!
 * Application controller.
 *
 * Ties the pipeline together: snapshot the document, extract the readable
 * region, partition it into translatable units, run the batch translation
 * over them, and render the reader page. One controller per reading
 * session; concurrent translate commands on the same session are rejected,
 * not queued.
 */

use std::sync::Arc;

use log::{info, warn};

use crate::app_config::{Config, CredentialStore};
use crate::errors::{AppError, TranslationError};
use crate::extractor::{ContentExtractor, ContentRegion, DocumentSnapshot};
use crate::partitioner::partition;
use crate::providers::Provider;
use crate::renderer::ReaderView;
use crate::session::{DifficultyLevel, ReadingSession};
use crate::translation::{BatchOrchestrator, RunOutcome, TranslationClient};

/// Drives the extract-translate-render pipeline for one session
pub struct Controller {
    config: Config,
    provider: Arc<dyn Provider>,
    credentials: Arc<dyn CredentialStore>,
    session: ReadingSession,
}

impl Controller {
    /// Create a controller; the session starts at the configured difficulty
    pub fn new(
        config: Config,
        provider: Arc<dyn Provider>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let session = ReadingSession::new(DifficultyLevel::new(config.difficulty));
        Self {
            config,
            provider,
            credentials,
            session,
        }
    }

    /// The session this controller drives
    pub fn session(&self) -> &ReadingSession {
        &self.session
    }

    /// Run the full pipeline over a captured page and return the reader
    /// view as a standalone HTML document.
    ///
    /// `difficulty` overrides the session level for this run and becomes
    /// the new session level. While a run is in flight further calls fail
    /// with [`AppError::RunInProgress`].
    pub async fn translate(
        &self,
        html: &str,
        difficulty: Option<DifficultyLevel>,
    ) -> Result<String, AppError> {
        let _guard = self.session.begin_run()?;

        let difficulty = match difficulty {
            Some(level) => {
                self.session.set_difficulty(level);
                level
            }
            None => self.session.difficulty(),
        };

        let snapshot = DocumentSnapshot::new(html);
        let region = ContentExtractor::new().extract(&snapshot);
        let title = region
            .title()
            .unwrap_or_else(|| "Untitled".to_string());

        let mut units = partition(&region);
        if units.is_empty() {
            return Err(AppError::ContentNotFound(
                "page yields no translatable units".to_string(),
            ));
        }
        info!(
            "Extracted '{}': {} unit(s), {} chars of text, difficulty {}",
            title,
            units.len(),
            region.text_len(),
            difficulty
        );

        let outcome = self.run_translation(&mut units, difficulty).await?;
        if outcome.units_left_original > 0 {
            warn!(
                "{} unit(s) kept their original text",
                outcome.units_left_original
            );
        }
        info!(
            "Translated {} unit(s) in {} batch(es)",
            outcome.units_translated, outcome.batches_issued
        );

        self.render(&region, &title, difficulty)
    }

    /// Request cancellation of the in-flight run, if any. Already-written
    /// units keep their translations.
    pub fn cancel(&self) {
        self.session.cancel_token().cancel();
    }

    async fn run_translation(
        &self,
        units: &mut [crate::partitioner::TranslatableUnit],
        difficulty: DifficultyLevel,
    ) -> Result<RunOutcome, AppError> {
        let client = TranslationClient::new(
            Arc::clone(&self.provider),
            Arc::clone(&self.credentials),
            self.session.cache().clone(),
            self.config.translation.clone(),
        );
        let orchestrator = BatchOrchestrator::new(client);
        orchestrator
            .run(units, difficulty, self.session.cancel_token())
            .await
            .map_err(|e| match e {
                // A missing credential is a setup problem, not a transient
                // translation failure
                TranslationError::MissingCredential => {
                    AppError::Configuration("no API credential configured".to_string())
                }
                other => other.into(),
            })
    }

    fn render(
        &self,
        region: &ContentRegion,
        title: &str,
        difficulty: DifficultyLevel,
    ) -> Result<String, AppError> {
        let view = ReaderView::new(title, &self.config.translation.target_language, difficulty);
        Ok(view.render(region)?)
    }
}
