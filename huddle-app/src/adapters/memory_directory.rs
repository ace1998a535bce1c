//! In-memory server directory

use std::collections::HashSet;

use async_trait::async_trait;
use huddle_core::error::CoreResult;
use huddle_core::traits::ServerDirectory;
use huddle_core::types::Server;
use tokio::sync::RwLock;

#[derive(Default)]
struct Directory {
    servers: Vec<Server>,
    /// (server id, profile id)
    members: HashSet<(String, String)>,
}

impl Directory {
    fn by_code(&self, invite_code: &str) -> Option<&Server> {
        self.servers.iter().find(|s| s.invite_code == invite_code)
    }
}

/// Servers and memberships held in process memory.
///
/// Membership inserts happen under one write lock, so redeeming the same
/// invite concurrently never creates duplicates.
#[derive(Default)]
pub struct InMemoryServerDirectory {
    inner: RwLock<Directory>,
}

impl InMemoryServerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_servers(servers: Vec<Server>) -> Self {
        let members = servers
            .iter()
            .map(|s| (s.id.clone(), s.profile_id.clone()))
            .collect();
        Self {
            inner: RwLock::new(Directory { servers, members }),
        }
    }

    /// Add a server; its owner becomes a member.
    pub async fn insert_server(&self, server: Server) {
        let mut dir = self.inner.write().await;
        dir.members
            .insert((server.id.clone(), server.profile_id.clone()));
        dir.servers.retain(|s| s.id != server.id);
        dir.servers.push(server);
    }

    pub async fn member_count(&self, server_id: &str) -> usize {
        self.inner
            .read()
            .await
            .members
            .iter()
            .filter(|(s, _)| s == server_id)
            .count()
    }
}

#[async_trait]
impl ServerDirectory for InMemoryServerDirectory {
    async fn find_by_invite_code(&self, invite_code: &str) -> CoreResult<Option<Server>> {
        Ok(self.inner.read().await.by_code(invite_code).cloned())
    }

    async fn find_membership(
        &self,
        invite_code: &str,
        profile_id: &str,
    ) -> CoreResult<Option<Server>> {
        let dir = self.inner.read().await;
        Ok(dir
            .by_code(invite_code)
            .filter(|s| {
                dir.members
                    .contains(&(s.id.clone(), profile_id.to_string()))
            })
            .cloned())
    }

    async fn add_member_if_absent(
        &self,
        invite_code: &str,
        profile_id: &str,
    ) -> CoreResult<Option<Server>> {
        let mut dir = self.inner.write().await;
        let Some(server) = dir.by_code(invite_code).cloned() else {
            return Ok(None);
        };
        if dir
            .members
            .insert((server.id.clone(), profile_id.to_string()))
        {
            log::debug!("added {profile_id} to server {}", server.id);
        }
        Ok(Some(server))
    }
}
