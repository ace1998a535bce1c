//! Platform-agnostic application bootstrap for Huddle.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter
//! injection) and `AppConfig` (TOML configuration).

pub mod adapters;
pub mod config;

use std::sync::Arc;
use std::time::Duration;

use huddle_core::error::{CoreError, CoreResult};
use huddle_core::services::{
    InviteService, ModalController, ModalForm, ModalInstance, ServiceContext,
};
use huddle_core::traits::{BackendApi, Notifier, PageRefresher, ServerDirectory, SessionResolver};
use huddle_core::types::UploadSettings;
use huddle_storage::{create_store, ObjectStore};

use crate::adapters::{
    HttpBackendApi, InMemoryServerDirectory, LogNotifier, LogPageRefresher, StaticSessionResolver,
};
use crate::config::AppConfig;

/// Platform-agnostic application state.
///
/// Holds the `ServiceContext` and the services built on it. Every front end
/// constructs this once at startup via `AppStateBuilder`. Modal submits go
/// through [`mount`](Self::mount).
pub struct AppState {
    /// Service context (holds all adapters and the modal slot)
    pub ctx: Arc<ServiceContext>,
    /// Invite service
    pub invite_service: InviteService,
}

impl AppState {
    pub fn modal(&self) -> &ModalController {
        &self.ctx.modal
    }

    /// Mount a modal form against this state's context.
    pub fn mount<F: ModalForm>(&self, form: F) -> ModalInstance<F> {
        ModalInstance::mount(form, &self.ctx)
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `object_store`: where uploads go
/// - `backend_api`: where mutations go
///
/// # Optional
/// - `server_directory`: defaults to an empty `InMemoryServerDirectory`
/// - `session_resolver`: defaults to signed out
/// - `notifier` / `page_refresher`: default to logging
/// - `uploads`: defaults to `discord/serverImage`
pub struct AppStateBuilder {
    object_store: Option<Arc<dyn ObjectStore>>,
    backend_api: Option<Arc<dyn BackendApi>>,
    server_directory: Option<Arc<dyn ServerDirectory>>,
    session_resolver: Option<Arc<dyn SessionResolver>>,
    notifier: Option<Arc<dyn Notifier>>,
    page_refresher: Option<Arc<dyn PageRefresher>>,
    uploads: UploadSettings,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            object_store: None,
            backend_api: None,
            server_directory: None,
            session_resolver: None,
            notifier: None,
            page_refresher: None,
            uploads: UploadSettings::default(),
        }
    }

    /// Pre-populate the builder from configuration: storage backend, HTTP
    /// backend API, upload layout and the configured profile.
    pub fn from_config(config: &AppConfig) -> CoreResult<Self> {
        let store = create_store(config.storage_credentials()?)
            .map_err(|e| CoreError::ConfigError(e.to_string()))?;
        let backend = HttpBackendApi::new(
            config.backend.base_url.clone(),
            Duration::from_secs(config.backend.timeout_secs.max(1)),
        )?
        .with_auth_token(config.backend.auth_token.clone());
        log::info!(
            "storage backend: {}, backend API: {}",
            store.id(),
            config.backend.base_url
        );

        Ok(Self::new()
            .object_store(store)
            .backend_api(Arc::new(backend))
            .session_resolver(Arc::new(StaticSessionResolver::new(config.profile())))
            .uploads(config.upload_settings()))
    }

    #[must_use]
    pub fn object_store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.object_store = Some(store);
        self
    }

    #[must_use]
    pub fn backend_api(mut self, api: Arc<dyn BackendApi>) -> Self {
        self.backend_api = Some(api);
        self
    }

    #[must_use]
    pub fn server_directory(mut self, directory: Arc<dyn ServerDirectory>) -> Self {
        self.server_directory = Some(directory);
        self
    }

    #[must_use]
    pub fn session_resolver(mut self, resolver: Arc<dyn SessionResolver>) -> Self {
        self.session_resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn page_refresher(mut self, page: Arc<dyn PageRefresher>) -> Self {
        self.page_refresher = Some(page);
        self
    }

    #[must_use]
    pub fn uploads(mut self, uploads: UploadSettings) -> Self {
        self.uploads = uploads;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let object_store = self
            .object_store
            .ok_or_else(|| CoreError::ValidationError("object_store is required".to_string()))?;
        let backend_api = self
            .backend_api
            .ok_or_else(|| CoreError::ValidationError("backend_api is required".to_string()))?;
        let server_directory = self
            .server_directory
            .unwrap_or_else(|| Arc::new(InMemoryServerDirectory::new()));
        let session_resolver = self
            .session_resolver
            .unwrap_or_else(|| Arc::new(StaticSessionResolver::signed_out()));
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(LogNotifier));
        let page = self
            .page_refresher
            .unwrap_or_else(|| Arc::new(LogPageRefresher));

        let ctx = Arc::new(ServiceContext::new(
            object_store,
            backend_api,
            server_directory,
            session_resolver,
            notifier,
            page,
            self.uploads,
        ));

        Ok(AppState {
            invite_service: InviteService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
