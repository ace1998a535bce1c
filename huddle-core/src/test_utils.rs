//! Test helpers
//!
//! Mock implementations and convenience factories.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use huddle_storage::{ObjectKey, ObjectStore, ProgressCallback, StorageError, StoredObject, TransferProgress};
use tokio::sync::{Notify, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{BackendApi, Notifier, PageRefresher, ServerDirectory, SessionResolver};
use crate::types::{CandidateFile, MutationRequest, Notice, Profile, Server, UploadSettings};

// ===== Factories =====

pub fn sample_server(id: &str) -> Server {
    Server {
        id: id.to_string(),
        name: format!("Server {id}"),
        image_url: format!("https://cdn.test/discord/serverImage/{id}.png"),
        invite_code: format!("invite-{id}"),
        profile_id: "owner".to_string(),
    }
}

pub fn sample_profile(id: &str) -> Profile {
    Profile {
        id: id.to_string(),
        user_id: format!("user-{id}"),
        name: format!("User {id}"),
        image_url: String::new(),
        email: format!("{id}@example.com"),
    }
}

pub fn image_file(name: &str, size: usize) -> CandidateFile {
    CandidateFile::new(name, "image/jpeg", vec![0xAB_u8; size])
}

// ===== MockObjectStore =====

pub struct MockObjectStore {
    objects: RwLock<HashMap<String, Bytes>>,
    put_calls: AtomicUsize,
    /// Errors returned by the next `put_object` calls, front first
    failures: RwLock<Vec<StorageError>>,
    /// Progress callbacks per transfer
    steps: u64,
    /// When set, transfers pause halfway until notified
    gate: Option<Arc<Notify>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            put_calls: AtomicUsize::new(0),
            failures: RwLock::new(Vec::new()),
            steps: 4,
            gate: None,
        }
    }

    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = steps.max(1);
        self
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub async fn fail_next(&self, err: StorageError) {
        self.failures.write().await.push(err);
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.objects.read().await.contains_key(path)
    }

    pub fn url_for(path: &str) -> String {
        format!("https://storage.test/{path}")
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type: &str,
        on_progress: ProgressCallback,
    ) -> huddle_storage::Result<StoredObject> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        let total = data.len() as u64;
        let failure = {
            let mut failures = self.failures.write().await;
            (!failures.is_empty()).then(|| failures.remove(0))
        };

        for step in 1..=self.steps {
            if let Some(gate) = &self.gate {
                if step == self.steps / 2 + 1 {
                    gate.notified().await;
                }
            }
            if let Some(err) = &failure {
                if step > self.steps / 2 {
                    return Err(err.clone());
                }
            }
            // repeat each report once to exercise de-duplication
            let progress = TransferProgress::new(total * step / self.steps, total);
            on_progress(progress);
            on_progress(progress);
            tokio::task::yield_now().await;
        }

        self.objects.write().await.insert(key.path(), data);
        Ok(StoredObject {
            key: key.clone(),
            size: total,
            content_type: content_type.to_string(),
        })
    }

    async fn download_url(&self, key: &ObjectKey) -> huddle_storage::Result<String> {
        let path = key.path();
        if self.objects.read().await.contains_key(&path) {
            Ok(Self::url_for(&path))
        } else {
            Err(StorageError::ObjectNotFound {
                backend: "mock".to_string(),
                key: path,
                raw_message: None,
            })
        }
    }
}

// ===== MockBackendApi =====

pub struct MockBackendApi {
    requests: RwLock<Vec<MutationRequest>>,
    /// If Some, `send` fails with this status and message
    failure: RwLock<Option<(u16, String)>>,
}

impl MockBackendApi {
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
        }
    }

    pub async fn set_failure(&self, failure: Option<(u16, &str)>) {
        *self.failure.write().await = failure.map(|(s, m)| (s, m.to_string()));
    }

    pub async fn requests(&self) -> Vec<MutationRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl BackendApi for MockBackendApi {
    async fn send(&self, request: &MutationRequest) -> CoreResult<serde_json::Value> {
        self.requests.write().await.push(request.clone());
        if let Some((status, message)) = self.failure.read().await.clone() {
            return Err(CoreError::Submission {
                status: Some(status),
                message,
            });
        }
        Ok(serde_json::json!({ "ok": true }))
    }
}

// ===== MockServerDirectory =====

pub struct MockServerDirectory {
    servers: RwLock<Vec<Server>>,
    /// (server id, profile id)
    members: RwLock<Vec<(String, String)>>,
}

impl MockServerDirectory {
    pub fn new() -> Self {
        Self {
            servers: RwLock::new(Vec::new()),
            members: RwLock::new(Vec::new()),
        }
    }

    pub async fn add_server(&self, server: Server) {
        self.servers.write().await.push(server);
    }

    pub async fn member_count(&self) -> usize {
        self.members.read().await.len()
    }
}

#[async_trait]
impl ServerDirectory for MockServerDirectory {
    async fn find_by_invite_code(&self, invite_code: &str) -> CoreResult<Option<Server>> {
        Ok(self
            .servers
            .read()
            .await
            .iter()
            .find(|s| s.invite_code == invite_code)
            .cloned())
    }

    async fn find_membership(
        &self,
        invite_code: &str,
        profile_id: &str,
    ) -> CoreResult<Option<Server>> {
        let Some(server) = self.find_by_invite_code(invite_code).await? else {
            return Ok(None);
        };
        let is_member = self
            .members
            .read()
            .await
            .iter()
            .any(|(s, p)| *s == server.id && p == profile_id);
        Ok(is_member.then_some(server))
    }

    async fn add_member_if_absent(
        &self,
        invite_code: &str,
        profile_id: &str,
    ) -> CoreResult<Option<Server>> {
        let Some(server) = self.find_by_invite_code(invite_code).await? else {
            return Ok(None);
        };
        let mut members = self.members.write().await;
        if !members
            .iter()
            .any(|(s, p)| *s == server.id && p == profile_id)
        {
            members.push((server.id.clone(), profile_id.to_string()));
        }
        Ok(Some(server))
    }
}

// ===== StaticSessionResolver =====

pub struct StaticSessionResolver(pub Option<Profile>);

#[async_trait]
impl SessionResolver for StaticSessionResolver {
    async fn current_profile(&self) -> CoreResult<Option<Profile>> {
        Ok(self.0.clone())
    }
}

// ===== RecordingNotifier / RecordingRefresher =====

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
pub struct RecordingRefresher {
    refreshes: AtomicUsize,
    navigations: Mutex<Vec<String>>,
}

impl RecordingRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl PageRefresher for RecordingRefresher {
    fn refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }

    fn navigate(&self, path: &str) {
        self.navigations.lock().unwrap().push(path.to_string());
    }
}

// ===== TestHarness =====

/// A `ServiceContext` wired to mocks, with handles to inspect them.
pub struct TestHarness {
    pub store: Arc<MockObjectStore>,
    pub backend: Arc<MockBackendApi>,
    pub directory: Arc<MockServerDirectory>,
    pub notifier: Arc<RecordingNotifier>,
    pub page: Arc<RecordingRefresher>,
    ctx: Arc<ServiceContext>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::build(MockObjectStore::new(), None)
    }

    pub fn signed_in(profile: Profile) -> Self {
        Self::build(MockObjectStore::new(), Some(profile))
    }

    pub fn with_store(store: MockObjectStore) -> Self {
        Self::build(store, None)
    }

    fn build(store: MockObjectStore, profile: Option<Profile>) -> Self {
        let store = Arc::new(store);
        let backend = Arc::new(MockBackendApi::new());
        let directory = Arc::new(MockServerDirectory::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let page = Arc::new(RecordingRefresher::new());
        let ctx = Arc::new(ServiceContext::new(
            store.clone(),
            backend.clone(),
            directory.clone(),
            Arc::new(StaticSessionResolver(profile)),
            notifier.clone(),
            page.clone(),
            UploadSettings::default(),
        ));
        Self {
            store,
            backend,
            directory,
            notifier,
            page,
            ctx,
        }
    }

    pub fn ctx(&self) -> Arc<ServiceContext> {
        Arc::clone(&self.ctx)
    }
}
