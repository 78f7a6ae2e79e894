/*!
 * End-to-end tests for the extract-translate-render pipeline
 */

use std::sync::Arc;

use simplyread::app_config::{Config, MemoryCredentialStore};
use simplyread::app_controller::Controller;
use simplyread::errors::AppError;
use simplyread::providers::mock::MockProvider;
use simplyread::session::DifficultyLevel;

use crate::common::{SAMPLE_ARTICLE, init_test_logging};

fn controller_with(provider: MockProvider) -> Controller {
    Controller::new(
        Config::default(),
        Arc::new(provider),
        Arc::new(MemoryCredentialStore::with_credential("test-key")),
    )
}

#[tokio::test]
async fn test_pipeline_withSampleArticle_shouldProduceSpeakableReaderPage() {
    init_test_logging();
    let controller = controller_with(MockProvider::working());
    let page = controller.translate(SAMPLE_ARTICLE, None).await.unwrap();

    // Page chrome
    assert!(page.contains("<!DOCTYPE html>"));
    assert!(page.contains("<title>The Quiet Harbour</title>"));
    assert!(page.contains("speechSynthesis"));

    // Every article block is wrapped and gets a read-aloud trigger
    let blocks = page.matches("class=\"sr-block\"").count();
    assert!(blocks >= 4);
    assert_eq!(page.matches("class=\"sr-speak\"").count(), blocks);

    // Translated text is in, noise is out
    assert!(page.contains("[TRANSLATED] The harbour had been quiet"));
    assert!(!page.contains("Buy storm insurance today"));
    assert!(!page.contains("Home | World | Sport"));
    assert!(!page.contains("Copyright 2026"));
}

#[tokio::test]
async fn test_pipeline_shouldShowRequestedDifficultyInStripAndPrompt() {
    init_test_logging();
    let provider = MockProvider::working();
    let controller = controller_with(provider.clone());

    let page = controller
        .translate(SAMPLE_ARTICLE, Some(DifficultyLevel::new(2)))
        .await
        .unwrap();

    assert!(page.contains("<span class=\"sr-level sr-current\">2</span>"));
    let prompts = provider.received_prompts();
    assert!(!prompts.is_empty());
    assert!(prompts[0].contains("difficulty 2 of 10"));
}

#[tokio::test]
async fn test_pipeline_withProviderFailure_shouldSurfaceErrorNotPartialPage() {
    init_test_logging();
    let controller = controller_with(MockProvider::failing());
    let result = controller.translate(SAMPLE_ARTICLE, None).await;
    assert!(matches!(result, Err(AppError::Translation(_))));
}

#[tokio::test]
async fn test_pipeline_withChromeOnlyPage_shouldReportContentNotFound() {
    init_test_logging();
    let controller = controller_with(MockProvider::working());
    let html = "<html><body><nav>Home</nav><footer>About</footer></body></html>";
    let result = controller.translate(html, None).await;
    assert!(matches!(result, Err(AppError::ContentNotFound(_))));
}

#[tokio::test]
async fn test_pipeline_secondRunAtSameDifficulty_shouldServeFromCache() {
    init_test_logging();
    let provider = MockProvider::working();
    let controller = controller_with(provider.clone());

    controller.translate(SAMPLE_ARTICLE, None).await.unwrap();
    let first_count = provider.request_count();
    assert!(first_count > 0);

    let page = controller.translate(SAMPLE_ARTICLE, None).await.unwrap();
    assert!(page.contains("[TRANSLATED] The harbour had been quiet"));

    // Same text at the same difficulty never goes back to the provider
    assert_eq!(provider.request_count(), first_count);
}
