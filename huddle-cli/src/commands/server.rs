//! create-server, edit-server, delete-server

use huddle_app::config::AppConfig;
use huddle_core::services::{CreateServerForm, DeleteServerForm, EditServerForm};
use huddle_core::types::{ModalKind, ModalPayload, Server};

use super::{app_state, drop_file, open_modal, submit, EditServerArgs, ServerArgs};

pub async fn create(config: &AppConfig, args: ServerArgs) -> anyhow::Result<()> {
    let app = app_state(config)?;
    let modal = open_modal(
        &app,
        ModalKind::CreateServer,
        ModalPayload::None,
        CreateServerForm::new(args.name),
    );
    if let Some(image) = &args.image {
        drop_file(&modal, image).await?;
    }
    submit(modal).await
}

pub async fn edit(config: &AppConfig, args: EditServerArgs) -> anyhow::Result<()> {
    let app = app_state(config)?;
    let server = target(args.id, args.current_image);
    let mut modal = open_modal(
        &app,
        ModalKind::EditServer,
        ModalPayload::Server { server },
        EditServerForm::default(),
    );
    // prefill loaded the current values; apply the edits on top
    modal.form_mut().name = args.name;
    if let Some(image) = &args.image {
        drop_file(&modal, image).await?;
    }
    submit(modal).await
}

pub async fn delete(config: &AppConfig, id: String) -> anyhow::Result<()> {
    let app = app_state(config)?;
    let modal = open_modal(
        &app,
        ModalKind::DeleteServer,
        ModalPayload::Server {
            server: target(id, None),
        },
        DeleteServerForm,
    );
    submit(modal).await
}

/// Only the ID and image matter to these mutations.
fn target(id: String, image_url: Option<String>) -> Server {
    Server {
        name: id.clone(),
        id,
        image_url: image_url.unwrap_or_default(),
        invite_code: String::new(),
        profile_id: String::new(),
    }
}
