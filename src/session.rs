/*!
 * Per-page reading session state.
 *
 * Everything that outlives a single translate-and-render run but not the
 * page — current difficulty, the translation cache, the run-in-progress
 * guard, and the cancellation token — lives here as explicit fields and is
 * injected into the components that need it. No ambient globals.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, anyhow};
use parking_lot::RwLock;

use crate::errors::AppError;
use crate::translation::cache::TranslationCache;

/// Difficulty of the translated output, on a continuous 1..=10 scale.
///
/// Low values ask for simple vocabulary and short sentences; high values
/// permit native-level idiom. Out-of-range input is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DifficultyLevel(u8);

impl DifficultyLevel {
    /// Simplest output level
    pub const MIN: u8 = 1;
    /// Native-level output
    pub const MAX: u8 = 10;

    /// Create a level, clamping out-of-range values into 1..=10
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// The numeric level
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self(5)
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DifficultyLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: u8 = s
            .parse()
            .map_err(|_| anyhow!("Invalid difficulty level: {}", s))?;
        Ok(Self::new(value))
    }
}

/// Cooperative cancellation token checked between batches.
///
/// Cancelling does not interrupt an in-flight request; the run stops before
/// the next batch is issued, keeping already-translated units.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create an un-cancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the current run
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Re-arm the token for a new run
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

/// Releases the session's in-progress flag when dropped, so the flag is
/// cleared on every exit path including early errors
pub struct RunGuard {
    in_progress: Arc<AtomicBool>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.in_progress.store(false, Ordering::SeqCst);
    }
}

/// Mutable state shared across runs within one page load
pub struct ReadingSession {
    /// Current difficulty, mutated only by explicit user action
    difficulty: RwLock<DifficultyLevel>,

    /// Session-scoped translation cache, persists across runs
    cache: TranslationCache,

    /// One run at a time: set while a translate command is in flight
    in_progress: Arc<AtomicBool>,

    /// Cancellation token for the current run
    cancel: CancelToken,
}

impl ReadingSession {
    /// Create a fresh session with the given starting difficulty
    pub fn new(difficulty: DifficultyLevel) -> Self {
        Self {
            difficulty: RwLock::new(difficulty),
            cache: TranslationCache::new(),
            in_progress: Arc::new(AtomicBool::new(false)),
            cancel: CancelToken::new(),
        }
    }

    /// The session's current difficulty
    pub fn difficulty(&self) -> DifficultyLevel {
        *self.difficulty.read()
    }

    /// Set the difficulty (slider or button action)
    pub fn set_difficulty(&self, difficulty: DifficultyLevel) {
        *self.difficulty.write() = difficulty;
    }

    /// The session's translation cache
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// The session's cancellation token
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Claim the run slot.
    ///
    /// Rejects with `AppError::RunInProgress` when another run is already in
    /// flight; on success the returned guard holds the slot until dropped
    /// and the cancel token is re-armed.
    pub fn begin_run(&self) -> Result<RunGuard, AppError> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::RunInProgress);
        }

        self.cancel.reset();

        Ok(RunGuard {
            in_progress: self.in_progress.clone(),
        })
    }

    /// Whether a run is currently in flight
    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }
}

impl Default for ReadingSession {
    fn default() -> Self {
        Self::new(DifficultyLevel::default())
    }
}
