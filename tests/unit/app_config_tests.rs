/*!
 * Unit tests for configuration loading and credential stores
 */

use simplyread::app_config::{Config, CredentialStore, FileCredentialStore};

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_default_shouldCarrySaneValues() {
    let config = Config::default();
    assert_eq!(config.difficulty, 5);
    assert_eq!(config.translation.target_language, "English");
    assert!(!config.translation.model.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        &dir.path().to_path_buf(),
        "conf.json",
        r#"{ "difficulty": 2, "translation": { "api_key": "sk-test" } }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.difficulty, 2);
    assert_eq!(config.translation.api_key, "sk-test");
    // Unspecified fields take their defaults
    assert_eq!(config.translation.target_language, "English");
    assert_eq!(config.translation.timeout_secs, 30);
}

#[test]
fn test_saveAndFromFile_shouldRoundTrip() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.difficulty = 8;
    config.translation.target_language = "Spanish".to_string();
    config.save(&path).unwrap();

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.difficulty, 8);
    assert_eq!(reloaded.translation.target_language, "Spanish");
}

#[test]
fn test_validate_withBadValues_shouldFail() {
    let mut config = Config::default();
    config.difficulty = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.target_language = String::new();
    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_fileCredentialStore_shouldSeeRotatedKeyWithoutReload() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.translation.api_key = "first-key".to_string();
    config.save(&path).unwrap();

    let store = FileCredentialStore::new(&path);
    assert_eq!(store.get_credential().await.as_deref(), Some("first-key"));

    // External rotation: rewrite the file behind the store's back
    config.translation.api_key = "second-key".to_string();
    config.save(&path).unwrap();
    assert_eq!(store.get_credential().await.as_deref(), Some("second-key"));
}

#[tokio::test]
async fn test_fileCredentialStore_withEmptyKey_shouldReportNone() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    Config::default().save(&path).unwrap();

    let store = FileCredentialStore::new(&path);
    assert_eq!(store.get_credential().await, None);
}
