//! Invite link redemption

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::InviteOutcome;

/// Invite service
pub struct InviteService {
    ctx: Arc<ServiceContext>,
}

impl InviteService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Resolve an invite code for the signed-in profile.
    ///
    /// Redeeming the same code twice yields the same redirect and one membership.
    pub async fn redeem(&self, invite_code: &str) -> CoreResult<InviteOutcome> {
        let Some(profile) = self.ctx.session_resolver.current_profile().await? else {
            return Ok(InviteOutcome::SignInRequired);
        };

        let code = invite_code.trim();
        if code.is_empty() {
            return Ok(InviteOutcome::Home);
        }

        let directory = &self.ctx.server_directory;
        if let Some(server) = directory.find_membership(code, &profile.id).await? {
            log::debug!("profile {} already in server {}", profile.id, server.id);
            return Ok(InviteOutcome::Redirect {
                server_id: server.id,
                joined: false,
            });
        }

        if directory.find_by_invite_code(code).await?.is_none() {
            log::warn!("invite code not found: {code}");
            return Ok(InviteOutcome::Invalid);
        }

        match directory.add_member_if_absent(code, &profile.id).await? {
            Some(server) => {
                log::info!("profile {} joined server {}", profile.id, server.id);
                Ok(InviteOutcome::Redirect {
                    server_id: server.id,
                    joined: true,
                })
            }
            None => Ok(InviteOutcome::Invalid),
        }
    }
}
