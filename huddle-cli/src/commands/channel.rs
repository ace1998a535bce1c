//! create-channel

use huddle_app::config::AppConfig;
use huddle_core::services::CreateChannelForm;
use huddle_core::types::{ModalKind, ModalPayload};

use super::{app_state, open_modal, submit, ChannelArgs};

pub async fn create(config: &AppConfig, args: ChannelArgs) -> anyhow::Result<()> {
    let app = app_state(config)?;
    let modal = open_modal(
        &app,
        ModalKind::CreateChannel,
        ModalPayload::Channel {
            server_id: args.server_id,
            channel_type: Some(args.channel_type),
        },
        CreateChannelForm::new(args.name, args.channel_type),
    );
    submit(modal).await
}
