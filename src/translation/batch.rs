/*!
 * Batch translation processing.
 *
 * Groups translatable units into fixed-size contiguous batches, serializes
 * each batch into one composite request with a separator token, and
 * distributes the returned parts back onto the units by positional
 * correspondence. Batches run strictly sequentially: the separator protocol
 * requires exact request/response pairing, and sequential execution bounds
 * load on the remote service without correlation IDs.
 */

use log::{error, info, warn};

use crate::dom::set_text_content;
use crate::errors::TranslationError;
use crate::partitioner::TranslatableUnit;
use crate::session::{CancelToken, DifficultyLevel};
use crate::translation::client::TranslationClient;

/// Separator joining unit texts into one composite request. Chosen so it
/// does not otherwise collide with article prose.
pub const BATCH_SEPARATOR: &str = "\n---\n";

/// Number of units per batch; the last batch may be shorter
pub const BATCH_SIZE: usize = 5;

/// What a run accomplished, for reporting partial success to the user
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Batches actually sent to the provider
    pub batches_issued: usize,

    /// Units whose text was overwritten with a translation
    pub units_translated: usize,

    /// Units left at their original text (truncated responses or
    /// cancellation before their batch was issued)
    pub units_left_original: usize,

    /// Whether the run stopped early on the cancellation token
    pub cancelled: bool,
}

/// Orchestrates sequential batch translation over an ordered unit sequence
pub struct BatchOrchestrator {
    client: TranslationClient,
    batch_size: usize,
}

impl BatchOrchestrator {
    /// Create an orchestrator with the default batch size
    pub fn new(client: TranslationClient) -> Self {
        Self {
            client,
            batch_size: BATCH_SIZE,
        }
    }

    /// Override the batch size (tests exercise boundary shapes)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// The client driving this orchestrator
    pub fn client(&self) -> &TranslationClient {
        &self.client
    }

    /// Translate all units in place, batch by batch.
    ///
    /// Each unit is written at most once, by the single in-flight batch call
    /// responsible for it. A batch-level error aborts the remaining batches
    /// but never rolls back units already translated; partial translation is
    /// an accepted terminal state surfaced through the returned error. The
    /// cancellation token is checked between batches.
    pub async fn run(
        &self,
        units: &mut [TranslatableUnit],
        difficulty: DifficultyLevel,
        cancel: &CancelToken,
    ) -> Result<RunOutcome, TranslationError> {
        let mut outcome = RunOutcome::default();

        if units.is_empty() {
            return Ok(outcome);
        }

        let total_batches = units.len().div_ceil(self.batch_size);

        for (batch_index, batch) in units.chunks_mut(self.batch_size).enumerate() {
            if cancel.is_cancelled() {
                warn!(
                    "Run cancelled before batch {} of {}; keeping {} translated unit(s)",
                    batch_index + 1,
                    total_batches,
                    outcome.units_translated
                );
                outcome.cancelled = true;
                break;
            }

            let composite = batch
                .iter()
                .map(|unit| unit.original.as_str())
                .collect::<Vec<_>>()
                .join(BATCH_SEPARATOR);

            let translated = match self.client.translate(&composite, difficulty).await {
                Ok(text) => text,
                Err(e) => {
                    error!(
                        "Batch {} of {} failed, aborting remaining batches: {}",
                        batch_index + 1,
                        total_batches,
                        e
                    );
                    return Err(e);
                }
            };

            outcome.batches_issued += 1;

            let parts: Vec<&str> = translated.split(BATCH_SEPARATOR).collect();
            if parts.len() < batch.len() {
                warn!(
                    "Batch {} returned {} part(s) for {} unit(s); trailing units keep their original text",
                    batch_index + 1,
                    parts.len(),
                    batch.len()
                );
            }

            for (i, unit) in batch.iter_mut().enumerate() {
                let Some(part) = parts.get(i).map(|p| p.trim()) else {
                    continue;
                };
                if part.is_empty() {
                    continue;
                }

                if !set_text_content(&unit.node, part) {
                    // The handle stopped pointing at a text node; a unit is
                    // only ever written through here, so this is a
                    // programming error, not a data condition.
                    error!(
                        "Unit {} no longer addresses a text node; skipping write",
                        unit.index
                    );
                    continue;
                }

                unit.current = part.to_string();
                outcome.units_translated += 1;
            }

            info!(
                "Batch {} of {} done ({} unit(s) translated so far)",
                batch_index + 1,
                total_batches,
                outcome.units_translated
            );
        }

        outcome.units_left_original = units.len() - outcome.units_translated;

        Ok(outcome)
    }
}
