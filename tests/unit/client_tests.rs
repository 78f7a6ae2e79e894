/*!
 * Unit tests for the cache-fronted translation client
 */

use std::sync::Arc;

use simplyread::app_config::{MemoryCredentialStore, TranslationConfig};
use simplyread::errors::TranslationError;
use simplyread::providers::mock::MockProvider;
use simplyread::session::DifficultyLevel;
use simplyread::translation::{TranslationCache, TranslationClient};

fn client_with(provider: MockProvider, credentials: MemoryCredentialStore) -> TranslationClient {
    TranslationClient::new(
        Arc::new(provider),
        Arc::new(credentials),
        TranslationCache::new(),
        TranslationConfig::default(),
    )
}

#[test]
fn test_translate_withWorkingProvider_shouldReturnTranslation() {
    let client = client_with(
        MockProvider::working(),
        MemoryCredentialStore::with_credential("test-key"),
    );
    let result = tokio_test::block_on(async {
        client.translate("Hello world", DifficultyLevel::new(4)).await
    });
    assert_eq!(result.unwrap(), "[TRANSLATED] Hello world");
}

#[tokio::test]
async fn test_translate_withMissingCredential_shouldFailBeforeAnyCall() {
    let provider = MockProvider::working();
    let client = client_with(provider.clone(), MemoryCredentialStore::empty());

    let result = client.translate("Hello", DifficultyLevel::new(4)).await;
    assert!(matches!(result, Err(TranslationError::MissingCredential)));
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translate_withCachedText_shouldSkipProvider() {
    let provider = MockProvider::working();
    let client = client_with(
        provider.clone(),
        MemoryCredentialStore::with_credential("test-key"),
    );

    let first = client.translate("Hello", DifficultyLevel::new(4)).await.unwrap();
    let second = client.translate("Hello", DifficultyLevel::new(4)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(provider.request_count(), 1);
}

#[test]
fn test_translate_withEmptyText_shouldShortCircuit() {
    let provider = MockProvider::working();
    let client = client_with(
        provider.clone(),
        MemoryCredentialStore::with_credential("test-key"),
    );

    let result = tokio_test::block_on(async {
        client.translate("   ", DifficultyLevel::new(4)).await
    });
    assert_eq!(result.unwrap(), "");
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translate_withEmptyCompletion_shouldReportEmptyResponse() {
    let client = client_with(
        MockProvider::empty(),
        MemoryCredentialStore::with_credential("test-key"),
    );
    let result = client.translate("Hello", DifficultyLevel::new(4)).await;
    assert!(matches!(result, Err(TranslationError::EmptyResponse)));
}

#[tokio::test]
async fn test_translate_withDifferentDifficulty_shouldIssueSecondCall() {
    let provider = MockProvider::working();
    let client = client_with(
        provider.clone(),
        MemoryCredentialStore::with_credential("test-key"),
    );

    client.translate("Hello", DifficultyLevel::new(3)).await.unwrap();
    client.translate("Hello", DifficultyLevel::new(7)).await.unwrap();

    // Same text, distinct cache keys
    assert_eq!(provider.request_count(), 2);
}

#[tokio::test]
async fn test_translate_afterFailure_shouldRetryInsteadOfCachingFailure() {
    let provider = MockProvider::failing();
    let client = client_with(
        provider.clone(),
        MemoryCredentialStore::with_credential("test-key"),
    );

    assert!(client.translate("Hello", DifficultyLevel::new(4)).await.is_err());
    assert!(client.translate("Hello", DifficultyLevel::new(4)).await.is_err());

    // No negative caching: the second identical call went to the provider
    assert_eq!(provider.request_count(), 2);
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn test_translateOrOriginal_withFailingProvider_shouldReturnInput() {
    let client = client_with(
        MockProvider::failing(),
        MemoryCredentialStore::with_credential("test-key"),
    );
    let result = client
        .translate_or_original("Keep me as I am", DifficultyLevel::new(4))
        .await;
    assert_eq!(result, "Keep me as I am");
}

#[tokio::test]
async fn test_translate_withRotatedCredential_shouldPickUpNewKey() {
    use simplyread::app_config::CredentialStore;

    let credentials = Arc::new(MemoryCredentialStore::empty());
    let client = TranslationClient::new(
        Arc::new(MockProvider::working()),
        credentials.clone(),
        TranslationCache::new(),
        TranslationConfig::default(),
    );

    let before = client.translate("Hello", DifficultyLevel::new(4)).await;
    assert!(matches!(before, Err(TranslationError::MissingCredential)));

    // The store is consulted on every call, so the rotated key takes
    // effect without rebuilding the client
    credentials.set_credential("fresh-key").await.unwrap();
    let after = client.translate("Hello", DifficultyLevel::new(4)).await;
    assert!(after.is_ok());
}

#[tokio::test]
async fn test_translate_afterCredentialRevocation_shouldFailBeforeAnyCall() {
    let provider = MockProvider::working();
    let credentials = Arc::new(MemoryCredentialStore::with_credential("live-key"));
    let client = TranslationClient::new(
        Arc::new(provider.clone()),
        credentials.clone(),
        TranslationCache::new(),
        TranslationConfig::default(),
    );

    client
        .translate("Before revocation", DifficultyLevel::new(4))
        .await
        .unwrap();
    credentials.clear();

    let result = client.translate("After revocation", DifficultyLevel::new(4)).await;
    assert!(matches!(result, Err(TranslationError::MissingCredential)));
    // The revoked key never reaches the provider
    assert_eq!(provider.request_count(), 1);
}
