/*!
 * Reader-view rendering.
 *
 * Takes the extracted (and by now translated in place) content region and
 * produces a single self-contained HTML page: cleaned article blocks, a
 * difficulty strip showing the level the text was produced at, and a speak
 * button per block wired to an inline speech script. The page is built in
 * one pass and returned whole, so callers swap their output in a single
 * write rather than mutating a live document.
 */

use crate::dom::{get_node_name, node_text, serialize_node};
use crate::errors::RenderError;
use crate::extractor::ContentRegion;
use crate::session::DifficultyLevel;
use markup5ever_rcdom::NodeData;

/// Builder for the final reader page
pub struct ReaderView {
    title: String,
    language: String,
    difficulty: DifficultyLevel,
}

const PAGE_STYLE: &str = r#"
body { margin: 0 auto; max-width: 42rem; padding: 1.5rem 1rem 4rem;
       font: 1.05rem/1.7 Georgia, 'Times New Roman', serif; color: #1c1c1c; }
h1.sr-title { font-size: 1.7rem; line-height: 1.3; }
.sr-strip { display: flex; gap: 0.3rem; align-items: center; margin: 1rem 0 2rem;
            font-family: system-ui, sans-serif; font-size: 0.8rem; color: #666; }
.sr-strip span.sr-level { width: 1.6rem; height: 1.6rem; display: inline-flex;
            align-items: center; justify-content: center; border-radius: 50%;
            border: 1px solid #ccc; }
.sr-strip span.sr-level.sr-current { background: #2b6cb0; border-color: #2b6cb0;
            color: #fff; font-weight: bold; }
.sr-block { position: relative; margin: 0 0 1rem; }
.sr-speak { position: absolute; left: -2.4rem; top: 0.2rem; width: 1.8rem;
            height: 1.8rem; border: none; border-radius: 50%; background: #eee;
            cursor: pointer; font-size: 0.8rem; }
.sr-speak:hover { background: #2b6cb0; color: #fff; }
.sr-block img { max-width: 100%; height: auto; }
"#;

// Speech is cancel-and-replace: a click stops whatever is playing before
// starting the new utterance. Voice lists load asynchronously in some
// engines, so voice lookup retries on voiceschanged and speaking works even
// while the list is still empty (the engine default is used).
const SPEECH_SCRIPT: &str = r#"
(function () {
  var lang = document.documentElement.lang || '';
  var voice = null;

  function pickVoice() {
    var voices = window.speechSynthesis.getVoices();
    var primary = lang.split('-')[0].toLowerCase();
    for (var i = 0; i < voices.length; i++) {
      if (voices[i].lang.split('-')[0].toLowerCase() === primary) {
        return voices[i];
      }
    }
    return null;
  }

  voice = pickVoice();
  if (window.speechSynthesis.onvoiceschanged !== undefined) {
    window.speechSynthesis.onvoiceschanged = function () {
      if (!voice) { voice = pickVoice(); }
    };
  }

  document.addEventListener('click', function (event) {
    var button = event.target.closest('.sr-speak');
    if (!button) { return; }
    var block = button.closest('.sr-block');
    if (!block) { return; }

    window.speechSynthesis.cancel();
    var utterance = new SpeechSynthesisUtterance(block.innerText);
    if (voice) { utterance.voice = voice; }
    if (lang) { utterance.lang = lang; }
    window.speechSynthesis.speak(utterance);
  });
})();
"#;

impl ReaderView {
    /// Create a view for the given page metadata
    pub fn new(title: impl Into<String>, language: impl Into<String>, difficulty: DifficultyLevel) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
            difficulty,
        }
    }

    /// Render the region into a complete standalone page.
    ///
    /// Fails with [`RenderError::InvariantViolation`] when the region yields
    /// no renderable blocks, since an empty reader page would silently hide
    /// an upstream extraction problem.
    pub fn render(&self, region: &ContentRegion) -> Result<String, RenderError> {
        let blocks = self.render_blocks(region)?;
        let strip = self.difficulty_strip();
        let title = escape_html(&self.title);

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<h1 class="sr-title">{title}</h1>
{strip}
<main class="sr-article">
{blocks}
</main>
<script>{script}</script>
</body>
</html>
"#,
            lang = escape_attr(&self.language),
            title = title,
            style = PAGE_STYLE,
            strip = strip,
            blocks = blocks,
            script = SPEECH_SCRIPT,
        ))
    }

    fn render_blocks(&self, region: &ContentRegion) -> Result<String, RenderError> {
        let mut blocks = String::new();
        let mut count = 0usize;

        for child in region.root().children.borrow().iter() {
            match &child.data {
                NodeData::Element { .. } => {
                    let name = get_node_name(child).unwrap_or_default();
                    let markup = serialize_node(child);
                    if markup.trim().is_empty() {
                        continue;
                    }
                    blocks.push_str(&format!(
                        "<div class=\"sr-block\" data-tag=\"{name}\">\
                         <button class=\"sr-speak\" type=\"button\" title=\"Read aloud\" aria-label=\"Read this section aloud\">&#128266;</button>\
                         {markup}</div>\n",
                    ));
                    count += 1;
                }
                NodeData::Text { .. } => {
                    // Stray text directly under the region root gets its own
                    // paragraph so it stays speakable
                    let text = node_text(child);
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    blocks.push_str(&format!(
                        "<div class=\"sr-block\" data-tag=\"p\">\
                         <button class=\"sr-speak\" type=\"button\" title=\"Read aloud\" aria-label=\"Read this section aloud\">&#128266;</button>\
                         <p>{}</p></div>\n",
                        escape_html(trimmed),
                    ));
                    count += 1;
                }
                _ => {}
            }
        }

        if count == 0 {
            return Err(RenderError::InvariantViolation(
                "content region produced no renderable blocks".to_string(),
            ));
        }

        Ok(blocks)
    }

    // One dot per level, the active one filled in
    fn difficulty_strip(&self) -> String {
        let current = self.difficulty.value();
        let mut strip = String::from("<div class=\"sr-strip\" role=\"img\" aria-label=\"Reading difficulty\">\n<span>Difficulty</span>\n");
        for level in DifficultyLevel::MIN..=DifficultyLevel::MAX {
            let class = if level == current {
                "sr-level sr-current"
            } else {
                "sr-level"
            };
            strip.push_str(&format!("<span class=\"{class}\">{level}</span>\n"));
        }
        strip.push_str("</div>");
        strip
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}
