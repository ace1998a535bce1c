//! Form values and mutation mapping for each modal

use crate::error::{CoreError, CoreResult};
use crate::traits::PageRefresher;
use crate::types::{
    AttachmentBody, ChannelBody, ChannelType, HttpMethod, ModalKind, ModalPayload,
    MutationRequest, Notice, ServerBody,
};

/// Reserved channel name created with every server.
const DEFAULT_CHANNEL: &str = "general";

/// A modal's form: validation, the mutation it fires and its side effects.
pub trait ModalForm: Send + Sync {
    fn kind(&self) -> ModalKind;

    /// Client-side checks; errors are shown inline and nothing is sent.
    fn validate(&self) -> CoreResult<()> {
        Ok(())
    }

    /// Whether submitting without an uploaded file is an error.
    fn requires_upload(&self) -> bool {
        false
    }

    /// Build the mutation. `locator` is the download URL of the uploaded file, if any.
    fn build_request(
        &self,
        payload: &ModalPayload,
        locator: Option<&str>,
    ) -> CoreResult<MutationRequest>;

    fn success_notice(&self) -> Option<Notice> {
        None
    }

    /// Page effects after the mutation succeeded.
    fn after_success(&self, page: &dyn PageRefresher) {
        page.refresh();
    }

    /// Copy initial values from the payload when the modal opens.
    fn prefill(&mut self, _payload: &ModalPayload) {}

    /// Remote resource to preview before any file is dropped.
    fn existing_locator(&self, _payload: &ModalPayload) -> Option<String> {
        None
    }

    /// Clear all values.
    fn reset(&mut self);
}

fn required(value: &str, message: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(message.to_string()));
    }
    Ok(trimmed.to_string())
}

fn target_server(payload: &ModalPayload, kind: ModalKind) -> CoreResult<&crate::types::Server> {
    payload
        .server()
        .ok_or_else(|| CoreError::ValidationError(format!("{kind} modal opened without a server")))
}

fn to_json<T: serde::Serialize>(body: &T) -> CoreResult<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| CoreError::SerializationError(e.to_string()))
}

// ===== CreateServerForm =====

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateServerForm {
    pub name: String,
}

impl CreateServerForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ModalForm for CreateServerForm {
    fn kind(&self) -> ModalKind {
        ModalKind::CreateServer
    }

    fn validate(&self) -> CoreResult<()> {
        required(&self.name, "Server name is required").map(drop)
    }

    fn build_request(
        &self,
        _payload: &ModalPayload,
        locator: Option<&str>,
    ) -> CoreResult<MutationRequest> {
        let body = ServerBody {
            name: required(&self.name, "Server name is required")?,
            image_url: locator.unwrap_or_default().to_string(),
        };
        Ok(MutationRequest::new(HttpMethod::Post, "/api/servers").with_body(to_json(&body)?))
    }

    fn success_notice(&self) -> Option<Notice> {
        Some(Notice::success(
            "Success create server",
            "Your server has been created successfully!",
        ))
    }

    fn reset(&mut self) {
        self.name.clear();
    }
}

// ===== EditServerForm =====

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditServerForm {
    pub name: String,
    /// Current image; replaced by a fresh upload if one happens
    pub image_url: String,
}

impl ModalForm for EditServerForm {
    fn kind(&self) -> ModalKind {
        ModalKind::EditServer
    }

    fn validate(&self) -> CoreResult<()> {
        required(&self.name, "Server name is required").map(drop)
    }

    fn build_request(
        &self,
        payload: &ModalPayload,
        locator: Option<&str>,
    ) -> CoreResult<MutationRequest> {
        let server = target_server(payload, self.kind())?;
        let body = ServerBody {
            name: required(&self.name, "Server name is required")?,
            image_url: locator.unwrap_or(&self.image_url).to_string(),
        };
        Ok(
            MutationRequest::new(HttpMethod::Patch, format!("/api/servers/{}", server.id))
                .with_body(to_json(&body)?),
        )
    }

    fn success_notice(&self) -> Option<Notice> {
        Some(Notice::success(
            "Success update server",
            "Your server has been updated successfully!",
        ))
    }

    fn prefill(&mut self, payload: &ModalPayload) {
        if let Some(server) = payload.server() {
            self.name.clone_from(&server.name);
            self.image_url.clone_from(&server.image_url);
        }
    }

    fn existing_locator(&self, payload: &ModalPayload) -> Option<String> {
        payload
            .server()
            .map(|s| s.image_url.clone())
            .filter(|url| !url.is_empty())
    }

    fn reset(&mut self) {
        self.name.clear();
        self.image_url.clear();
    }
}

// ===== DeleteServerForm =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteServerForm;

impl ModalForm for DeleteServerForm {
    fn kind(&self) -> ModalKind {
        ModalKind::DeleteServer
    }

    fn build_request(
        &self,
        payload: &ModalPayload,
        _locator: Option<&str>,
    ) -> CoreResult<MutationRequest> {
        let server = target_server(payload, self.kind())?;
        Ok(MutationRequest::new(
            HttpMethod::Delete,
            format!("/api/servers/{}", server.id),
        ))
    }

    fn after_success(&self, page: &dyn PageRefresher) {
        page.refresh();
        page.navigate("/");
    }

    fn reset(&mut self) {}
}

// ===== CreateChannelForm =====

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateChannelForm {
    pub name: String,
    pub channel_type: ChannelType,
}

impl CreateChannelForm {
    pub fn new(name: impl Into<String>, channel_type: ChannelType) -> Self {
        Self {
            name: name.into(),
            channel_type,
        }
    }
}

impl ModalForm for CreateChannelForm {
    fn kind(&self) -> ModalKind {
        ModalKind::CreateChannel
    }

    fn validate(&self) -> CoreResult<()> {
        let name = required(&self.name, "Channel name is required")?;
        if name.eq_ignore_ascii_case(DEFAULT_CHANNEL) {
            return Err(CoreError::ValidationError(format!(
                "Channel name cannot be '{DEFAULT_CHANNEL}'"
            )));
        }
        Ok(())
    }

    fn build_request(
        &self,
        payload: &ModalPayload,
        _locator: Option<&str>,
    ) -> CoreResult<MutationRequest> {
        let server_id = match payload {
            ModalPayload::Channel { server_id, .. } => server_id.as_str(),
            ModalPayload::Server { server } => server.id.as_str(),
            _ => {
                return Err(CoreError::ValidationError(
                    "createChannel modal opened without a server".to_string(),
                ))
            }
        };
        let body = ChannelBody {
            name: required(&self.name, "Channel name is required")?,
            channel_type: self.channel_type,
        };
        Ok(MutationRequest::new(HttpMethod::Post, "/api/channels")
            .with_query("serverId", server_id)
            .with_body(to_json(&body)?))
    }

    fn success_notice(&self) -> Option<Notice> {
        Some(Notice::success(
            "Success create channel",
            "Your channel has been created successfully!",
        ))
    }

    fn prefill(&mut self, payload: &ModalPayload) {
        if let ModalPayload::Channel {
            channel_type: Some(channel_type),
            ..
        } = payload
        {
            self.channel_type = *channel_type;
        }
    }

    fn reset(&mut self) {
        self.name.clear();
        self.channel_type = ChannelType::default();
    }
}

// ===== MessageFileForm =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageFileForm;

impl ModalForm for MessageFileForm {
    fn kind(&self) -> ModalKind {
        ModalKind::MessageFile
    }

    fn requires_upload(&self) -> bool {
        true
    }

    fn build_request(
        &self,
        payload: &ModalPayload,
        locator: Option<&str>,
    ) -> CoreResult<MutationRequest> {
        let ModalPayload::Message { api_url, query } = payload else {
            return Err(CoreError::ValidationError(
                "messageFile modal opened without a target".to_string(),
            ));
        };
        let file_url = locator
            .ok_or_else(|| CoreError::ValidationError("Attachment is required".to_string()))?
            .to_string();
        let body = AttachmentBody {
            content: file_url.clone(),
            file_url,
        };
        let mut request =
            MutationRequest::new(HttpMethod::Post, api_url.as_str()).with_body(to_json(&body)?);
        request.query.clone_from(query);
        Ok(request)
    }

    fn success_notice(&self) -> Option<Notice> {
        Some(Notice::success(
            "Success upload file",
            "Your file has been uploaded successfully!",
        ))
    }

    fn reset(&mut self) {}
}
