//! Signed-in profile lookup abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Profile;

#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// The signed-in profile, `None` when signed out
    async fn current_profile(&self) -> CoreResult<Option<Profile>>;
}
