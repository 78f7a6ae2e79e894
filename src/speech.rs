/*!
 * Speech capability interface.
 *
 * The synthesis engine itself is an external collaborator; this module
 * defines the seam the renderer and controller talk to, plus the voice
 * readiness future. Some environments report an empty voice list at first
 * and populate it asynchronously, so readiness polls until the list is
 * non-empty or a bounded timeout passes, and the result is memoized for the
 * process lifetime.
 */

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::OnceCell;

/// One available synthesis voice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Engine-specific voice name
    pub name: String,

    /// BCP 47 language tag (e.g. "en-US")
    pub language_tag: String,
}

/// The speech-synthesis collaborator.
///
/// `speak` has cancel-and-replace semantics: starting a new utterance
/// cancels any in-flight one. `list_voices` may transiently return an empty
/// list; callers go through [`VoiceRegistry::voices_ready`] instead of
/// polling it themselves.
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak the text, cancelling any utterance already in flight
    fn speak(&self, text: &str, language_hint: &str);

    /// Enumerate currently known voices (possibly empty while loading)
    fn list_voices(&self) -> Vec<Voice>;
}

/// Synthesizer that discards utterances, for headless runs and tests
#[derive(Debug, Default)]
pub struct NullSpeech;

impl SpeechSynthesizer for NullSpeech {
    fn speak(&self, text: &str, language_hint: &str) {
        debug!(
            "Discarding utterance ({} chars, language hint '{}')",
            text.len(),
            language_hint
        );
    }

    fn list_voices(&self) -> Vec<Voice> {
        Vec::new()
    }
}

/// Memoized voice acquisition over a synthesizer
pub struct VoiceRegistry {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    voices: OnceCell<Vec<Voice>>,
    timeout: Duration,
    poll_interval: Duration,
}

impl VoiceRegistry {
    /// How long to wait for the voice list before settling for empty
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

    /// Create a registry with the default readiness timeout
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self::with_timeout(synthesizer, Self::DEFAULT_TIMEOUT)
    }

    /// Create a registry with an explicit readiness timeout
    pub fn with_timeout(synthesizer: Arc<dyn SpeechSynthesizer>, timeout: Duration) -> Self {
        Self {
            synthesizer,
            voices: OnceCell::new(),
            timeout,
            poll_interval: Duration::from_millis(50),
        }
    }

    /// The underlying synthesizer
    pub fn synthesizer(&self) -> &Arc<dyn SpeechSynthesizer> {
        &self.synthesizer
    }

    /// Resolve once on the first non-empty voice list, or after the bounded
    /// timeout with whatever the engine reports then. Subsequent calls
    /// return the memoized result immediately.
    pub async fn voices_ready(&self) -> &[Voice] {
        self.voices
            .get_or_init(|| async {
                let deadline = tokio::time::Instant::now() + self.timeout;

                loop {
                    let voices = self.synthesizer.list_voices();
                    if !voices.is_empty() {
                        info!("Voice list ready ({} voice(s))", voices.len());
                        return voices;
                    }
                    if tokio::time::Instant::now() >= deadline {
                        info!("Voice list still empty after timeout; continuing without voices");
                        return voices;
                    }
                    tokio::time::sleep(self.poll_interval).await;
                }
            })
            .await
    }

    /// Pick the first ready voice whose primary language subtag matches the
    /// hint (e.g. hint "en" matches "en-US")
    pub async fn pick_voice(&self, language_hint: &str) -> Option<Voice> {
        let hint = primary_subtag(language_hint);
        self.voices_ready()
            .await
            .iter()
            .find(|voice| primary_subtag(&voice.language_tag).eq_ignore_ascii_case(hint))
            .cloned()
    }
}

fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}
