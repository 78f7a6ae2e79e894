/*!
 * Translation pipeline: caching, prompting, provider calls, and batch
 * orchestration.
 *
 * - `cache`: (difficulty, source text) memoization, session-scoped
 * - `prompts`: difficulty-scaled prompt construction
 * - `client`: cache-through translation with credential re-read and fallback
 * - `batch`: sequential fixed-size batches over the unit sequence
 */

pub mod batch;
pub mod cache;
pub mod client;
pub mod prompts;

pub use batch::{BATCH_SEPARATOR, BATCH_SIZE, BatchOrchestrator, RunOutcome};
pub use cache::TranslationCache;
pub use client::TranslationClient;
pub use prompts::PromptBuilder;
