//! Fixed signed-in profile

use async_trait::async_trait;
use huddle_core::error::CoreResult;
use huddle_core::traits::SessionResolver;
use huddle_core::types::Profile;

/// Resolves to the same profile (or to "signed out") every time.
pub struct StaticSessionResolver {
    profile: Option<Profile>,
}

impl StaticSessionResolver {
    pub fn new(profile: Option<Profile>) -> Self {
        Self { profile }
    }

    pub fn signed_out() -> Self {
        Self { profile: None }
    }
}

#[async_trait]
impl SessionResolver for StaticSessionResolver {
    async fn current_profile(&self) -> CoreResult<Option<Profile>> {
        Ok(self.profile.clone())
    }
}
