//! Modal kinds and payloads

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::server::{ChannelType, Server};

/// Every modal the shell can show. At most one is open at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ModalKind {
    CreateServer,
    EditServer,
    DeleteServer,
    CreateChannel,
    MessageFile,
}

impl ModalKind {
    pub const ALL: [Self; 5] = [
        Self::CreateServer,
        Self::EditServer,
        Self::DeleteServer,
        Self::CreateChannel,
        Self::MessageFile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateServer => "createServer",
            Self::EditServer => "editServer",
            Self::DeleteServer => "deleteServer",
            Self::CreateChannel => "createChannel",
            Self::MessageFile => "messageFile",
        }
    }
}

impl fmt::Display for ModalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data handed to a modal when it is opened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ModalPayload {
    #[default]
    None,
    /// Edit / delete target
    Server { server: Server },
    /// Target server for a new channel, with an optional preselected type
    Channel {
        server_id: String,
        channel_type: Option<ChannelType>,
    },
    /// Where an attachment message is posted
    Message {
        api_url: String,
        query: BTreeMap<String, String>,
    },
}

impl ModalPayload {
    pub fn server(&self) -> Option<&Server> {
        match self {
            Self::Server { server } => Some(server),
            _ => None,
        }
    }
}

/// Snapshot of the global modal slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalState {
    pub kind: Option<ModalKind>,
    pub payload: ModalPayload,
    /// Bumped by every open and every effective close
    pub revision: u64,
}

impl ModalState {
    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.kind == Some(kind)
    }
}
