//! Invite redemption outcome

use serde::Serialize;

/// Where the invite page sends the user
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum InviteOutcome {
    /// No signed-in profile
    SignInRequired,
    /// Empty code; back to `/`
    Home,
    /// Member of the server (already, or just added)
    Redirect {
        server_id: String,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        joined: bool,
    },
    /// No server uses this code
    Invalid,
}

impl InviteOutcome {
    /// Route to navigate to.
    pub fn location(&self) -> String {
        match self {
            Self::SignInRequired => "/sign-in".to_string(),
            Self::Home => "/".to_string(),
            Self::Redirect { server_id, .. } => format!("/servers/{server_id}"),
            Self::Invalid => "/invite/invalid".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations() {
        assert_eq!(
            InviteOutcome::Redirect {
                server_id: "s1".into(),
                joined: true
            }
            .location(),
            "/servers/s1"
        );
        assert_eq!(InviteOutcome::Home.location(), "/");
    }
}
