//! send-attachment

use huddle_app::config::AppConfig;
use huddle_core::services::MessageFileForm;
use huddle_core::types::{ModalKind, ModalPayload};

use super::{app_state, drop_file, open_modal, submit, AttachmentArgs};

pub async fn send_attachment(config: &AppConfig, args: AttachmentArgs) -> anyhow::Result<()> {
    let app = app_state(config)?;
    let modal = open_modal(
        &app,
        ModalKind::MessageFile,
        ModalPayload::Message {
            api_url: args.api_url,
            query: args.query.into_iter().collect(),
        },
        MessageFileForm,
    );
    drop_file(&modal, &args.file).await?;
    submit(modal).await
}
