/*!
 * Unit tests for content extraction
 */

use crate::common::{SAMPLE_ARTICLE, region_from, sample_region};
use simplyread::extractor::{ContentExtractor, DocumentSnapshot, strip_tracking_params};
use simplyread::partitioner::partition;

#[test]
fn test_extract_withSampleArticle_shouldSelectArticleRegion() {
    let region = sample_region();
    let text = region.text();

    assert!(text.contains("The harbour had been quiet"));
    assert!(!text.contains("Home | World | Sport"));
    assert!(!text.contains("Copyright 2026"));
}

#[test]
fn test_extract_shouldDropNoiseInsideRegion() {
    let region = sample_region();
    let text = region.text();

    // Class-marked noise and hidden elements inside the article
    assert!(!text.contains("Buy storm insurance today"));
    assert!(!text.contains("Tracking pixel caption"));
    assert!(!text.contains("Related stories"));
    assert!(!text.contains("analytics"));
}

#[test]
fn test_extract_shouldPreferArticleOverContentClass() {
    let html = r#"<html><body>
        <div class="content">Wrapper text that must lose to the semantic tag even though it is long enough to qualify on its own merits as a candidate region for extraction purposes.</div>
        <article>The semantic article element wins region selection whenever it carries enough text to clear the minimum threshold, which this sentence comfortably does by itself.</article>
    </body></html>"#;
    let region = ContentExtractor::new().extract(&DocumentSnapshot::new(html));

    assert!(region.text().contains("semantic article element wins"));
    assert!(!region.text().contains("Wrapper text"));
}

#[test]
fn test_extract_withNoQualifyingCandidate_shouldFallBackToBody() {
    let html = "<html><body><article>Too short.</article><p>Loose body text.</p></body></html>";
    let region = ContentExtractor::new().extract(&DocumentSnapshot::new(html));

    // Body fallback keeps everything that survived noise removal
    assert!(region.text().contains("Too short."));
    assert!(region.text().contains("Loose body text."));
}

#[test]
fn test_extract_withEmptyPage_shouldYieldEmptyRegion() {
    let region = region_from("<html><body></body></html>");
    assert_eq!(region.text_len(), 0);
    assert!(partition(&region).is_empty());
}

#[test]
fn test_extract_shouldStripTrackingParamsFromLinks() {
    let region = sample_region();
    let markup = region.inner_html();

    assert!(!markup.contains("utm_source"));
    assert!(!markup.contains("utm_campaign"));
    // Functional query params survive
    assert!(markup.contains("page=2"));
}

#[test]
fn test_extract_shouldReadTitleFromHead() {
    let region = sample_region();
    assert_eq!(region.title().as_deref(), Some("The Quiet Harbour"));

    let untitled = region_from("<html><body><p>No head title here.</p></body></html>");
    assert_eq!(untitled.title(), None);
}

#[test]
fn test_stripTrackingParams_shouldOnlyTouchListedParams() {
    let cleaned = strip_tracking_params(
        "https://example.com/a?fbclid=abc&q=rust&gclid=xyz",
    )
    .unwrap();
    assert!(cleaned.contains("q=rust"));
    assert!(!cleaned.contains("fbclid"));
    assert!(!cleaned.contains("gclid"));

    // Relative hrefs are left alone
    assert_eq!(strip_tracking_params("/archive?page=2"), None);
}
