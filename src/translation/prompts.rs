/*!
 * Prompt construction for difficulty-scaled translation.
 *
 * The prompt carries two things: the separator-preservation contract that
 * the batch orchestrator depends on, and vocabulary/grammar/idiom
 * constraints that scale monotonically with the difficulty level.
 */

use crate::session::DifficultyLevel;
use crate::translation::batch::BATCH_SEPARATOR;

/// Fixed system instruction for every translation call.
///
/// The separator contract is load-bearing: the orchestrator splits the
/// completion on the same token it joined the batch with.
pub const SYSTEM_INSTRUCTION: &str = "You are a translation engine for a reader application. \
Translate the text the user provides into the requested language at the requested \
difficulty level. The input may contain several sub-texts separated by a line \
containing exactly \"---\". Keep that separator line between the translated \
sub-texts, produce the same number of sub-texts in the same order, and output \
nothing else: no explanations, no notes, no numbering.";

/// Builder for the user prompt of one translation call
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    target_language: String,
    difficulty: DifficultyLevel,
}

impl PromptBuilder {
    /// Create a builder for the given target language and difficulty
    pub fn new(target_language: impl Into<String>, difficulty: DifficultyLevel) -> Self {
        Self {
            target_language: target_language.into(),
            difficulty,
        }
    }

    /// Render the full user prompt for a batch text
    pub fn build(&self, batch_text: &str) -> String {
        format!(
            "Translate into {lang} at difficulty {level} of 10.\n\
             Constraints: {constraints}\n\
             Remember: keep every \"{sep}\" separator line in place.\n\n\
             {text}",
            lang = self.target_language,
            level = self.difficulty.value(),
            constraints = constraints_for(self.difficulty),
            sep = BATCH_SEPARATOR.trim(),
            text = batch_text,
        )
    }
}

/// Map a difficulty level to output constraints. Each tier strictly relaxes
/// the one below it, so constraint strength is monotonic in the level.
pub fn constraints_for(difficulty: DifficultyLevel) -> &'static str {
    match difficulty.value() {
        1..=2 => {
            "use only the most common everyday words, keep every sentence under \
             ten words, no idioms, no figurative language"
        }
        3..=4 => {
            "use common vocabulary, keep sentences short and simple, avoid idioms \
             and rare grammatical constructions"
        }
        5..=6 => {
            "use intermediate vocabulary, moderate sentence length, common idioms \
             are allowed when their meaning is clear from context"
        }
        7..=8 => {
            "use advanced vocabulary and natural sentence structure, idiomatic \
             expressions are welcome"
        }
        _ => {
            "translate at full native level with no simplification, preserving \
             register, nuance, and idiom"
        }
    }
}
