//! Server / membership lookup abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Server;

/// Server directory used by invite redemption
#[async_trait]
pub trait ServerDirectory: Send + Sync {
    /// Find the server that carries this invite code
    ///
    /// # Arguments
    /// * `invite_code` - Invite code from the link
    async fn find_by_invite_code(&self, invite_code: &str) -> CoreResult<Option<Server>>;

    /// Find the server with this invite code if `profile_id` is already a member
    async fn find_membership(
        &self,
        invite_code: &str,
        profile_id: &str,
    ) -> CoreResult<Option<Server>>;

    /// Insert a guest membership unless one already exists.
    ///
    /// Must be a single conditional write: concurrent calls for the same
    /// profile never create two memberships. Returns `None` when no server
    /// carries the code any more.
    async fn add_member_if_absent(
        &self,
        invite_code: &str,
        profile_id: &str,
    ) -> CoreResult<Option<Server>>;
}
