#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Loading `AppConfig` from files on disk.

use huddle_app::config::AppConfig;
use huddle_app::AppStateBuilder;
use huddle_core::error::CoreError;
use huddle_storage::StorageBackendType;

#[test]
fn loads_explicit_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[backend]
base_url = "https://chat.example.com"
timeout_secs = 5

[storage]
backend = "memory"
memory_base_url = "memory://test"
namespace = "huddle"

[uploads]
attachment_category = "attachments"

[profile]
id = "p1"
name = "Ferris"
"#,
    )
    .unwrap();

    let config = AppConfig::from_file(&path).unwrap();
    assert_eq!(config.backend.timeout_secs, 5);
    assert_eq!(config.storage.backend, StorageBackendType::Memory);

    let uploads = config.upload_settings();
    assert_eq!(uploads.namespace, "huddle");
    assert_eq!(uploads.server_image_category, "serverImage");
    assert_eq!(uploads.attachment_category, "attachments");
    assert_eq!(config.profile().map(|p| p.name), Some("Ferris".to_string()));

    // builds a complete state
    let state = AppStateBuilder::from_config(&config).unwrap().build().unwrap();
    assert_eq!(state.ctx.object_store.id(), "memory");
    assert_eq!(state.ctx.uploads.attachment_category, "attachments");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let err = AppConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigError(_)));
}

#[test]
fn written_config_can_be_read_back() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("config.toml");
    let mut config = AppConfig::default();
    config.storage.namespace = "custom".to_string();

    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
    assert_eq!(AppConfig::from_file(&path).unwrap(), config);
}

#[test]
fn firebase_config_needs_bucket() {
    let config = AppConfig::from_toml_str("[storage]\nbackend = \"firebase\"\n").unwrap();
    assert!(matches!(
        AppStateBuilder::from_config(&config),
        Err(CoreError::ConfigError(_))
    ));
}
