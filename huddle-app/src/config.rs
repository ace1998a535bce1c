//! TOML configuration
//!
//! Lookup order: explicit path, then `<config_dir>/huddle/config.toml`, then
//! built-in defaults. `HUDDLE_*` environment variables override file values.

use std::path::{Path, PathBuf};

use huddle_core::error::{CoreError, CoreResult};
use huddle_core::types::{Profile, UploadSettings};
use huddle_storage::{StorageBackendType, StorageCredentials};
use serde::{Deserialize, Serialize};

pub const ENV_BACKEND_URL: &str = "HUDDLE_BACKEND_URL";
pub const ENV_STORAGE_BUCKET: &str = "HUDDLE_STORAGE_BUCKET";
pub const ENV_STORAGE_TOKEN: &str = "HUDDLE_STORAGE_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub uploads: UploadsConfig,
    /// Signed-in profile used by headless front ends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Sent as a bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
            auth_token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
    /// Firebase bucket, e.g. `my-app.appspot.com`
    pub bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// API base override (emulator)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// URL prefix of the in-memory backend
    pub memory_base_url: String,
    pub namespace: String,
    pub max_retries: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Memory,
            bucket: String::new(),
            auth_token: None,
            endpoint: None,
            memory_base_url: "memory://huddle".to_string(),
            namespace: "discord".to_string(),
            max_retries: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    pub server_image_category: String,
    pub attachment_category: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        let defaults = UploadSettings::default();
        Self {
            server_image_category: defaults.server_image_category,
            attachment_category: defaults.attachment_category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl From<ProfileConfig> for Profile {
    fn from(p: ProfileConfig) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            name: p.name,
            image_url: String::new(),
            email: p.email,
        }
    }
}

impl AppConfig {
    /// `<config_dir>/huddle/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("huddle").join("config.toml"))
    }

    /// Load configuration and apply environment overrides.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    log::debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        log::info!("loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        toml::from_str(text).map_err(|e| CoreError::ConfigError(e.to_string()))
    }

    pub fn to_toml_string(&self) -> CoreResult<String> {
        toml::to_string_pretty(self).map_err(|e| CoreError::SerializationError(e.to_string()))
    }

    /// Apply `HUDDLE_*` overrides from `lookup` (normally the process environment).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_BACKEND_URL) {
            log::debug!("{ENV_BACKEND_URL} overrides backend.base_url");
            self.backend.base_url = url;
        }
        if let Some(bucket) = non_empty(ENV_STORAGE_BUCKET) {
            log::debug!("{ENV_STORAGE_BUCKET} overrides storage.bucket");
            self.storage.bucket = bucket;
            self.storage.backend = StorageBackendType::Firebase;
        }
        if let Some(token) = non_empty(ENV_STORAGE_TOKEN) {
            self.storage.auth_token = Some(token);
        }
    }

    /// Settings for `huddle_storage::create_store`.
    pub fn storage_credentials(&self) -> CoreResult<StorageCredentials> {
        let s = &self.storage;
        match s.backend {
            StorageBackendType::Firebase => {
                if s.bucket.trim().is_empty() {
                    return Err(CoreError::ConfigError(
                        "storage.bucket is required for the firebase backend".to_string(),
                    ));
                }
                Ok(StorageCredentials::Firebase {
                    bucket: s.bucket.clone(),
                    auth_token: s.auth_token.clone(),
                    endpoint: s.endpoint.clone(),
                    max_retries: s.max_retries,
                })
            }
            StorageBackendType::Memory => Ok(StorageCredentials::Memory {
                base_url: s.memory_base_url.clone(),
            }),
        }
    }

    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            namespace: self.storage.namespace.clone(),
            server_image_category: self.uploads.server_image_category.clone(),
            attachment_category: self.uploads.attachment_category.clone(),
        }
    }

    pub fn profile(&self) -> Option<Profile> {
        self.profile.clone().map(Profile::from)
    }
}
