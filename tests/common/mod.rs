/*!
 * Common test utilities for the simplyread test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use simplyread::extractor::{ContentExtractor, ContentRegion, DocumentSnapshot};
use simplyread::partitioner::{TranslatableUnit, partition};

/// A page with an article region, chrome around it, and typical noise inside
pub const SAMPLE_ARTICLE: &str = r#"<html>
<head><title>The Quiet Harbour</title><meta name="x" content="y"></head>
<body>
  <nav>Home | World | Sport</nav>
  <div class="header-nav"><a href="/">Back to front page</a></div>
  <article>
    <h1>The Quiet Harbour</h1>
    <p>The harbour had been quiet for three days, with the fishing fleet held
       in port by a gale that showed no sign of easing before the weekend.</p>
    <p>Older crews remembered the storm of 1987 and said this one felt
       different, slower, as if it intended to stay the whole month.</p>
    <p>Read more in our
       <a href="https://example.com/archive?page=2&utm_source=feed&utm_campaign=spring">weather archive</a>.</p>
    <div class="advertisement">Buy storm insurance today</div>
    <p style="display:none">Tracking pixel caption</p>
  </article>
  <aside class="sidebar">Related stories</aside>
  <footer>Copyright 2026</footer>
  <script>console.log('analytics');</script>
</body>
</html>"#;

/// Route `log` output to the test harness so `--nocapture` shows it.
/// Safe to call from every test; only the first call installs the logger.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Extract a region with the default thresholds
pub fn sample_region() -> ContentRegion {
    region_from(SAMPLE_ARTICLE)
}

/// Extract a region with the length threshold disabled, for small fixtures
pub fn region_from(html: &str) -> ContentRegion {
    ContentExtractor::new()
        .with_min_region_text(0)
        .extract(&DocumentSnapshot::new(html))
}

/// Build a page of `count` numbered paragraphs and partition it
pub fn numbered_units(count: usize) -> (ContentRegion, Vec<TranslatableUnit>) {
    let mut body = String::from("<html><body><article>");
    for i in 1..=count {
        body.push_str(&format!("<p>Paragraph number {} of the fixture.</p>", i));
    }
    body.push_str("</article></body></html>");

    let region = region_from(&body);
    let units = partition(&region);
    assert_eq!(units.len(), count, "fixture should yield one unit per paragraph");
    (region, units)
}
