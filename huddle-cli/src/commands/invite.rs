//! redeem-invite

use std::sync::Arc;

use huddle_app::adapters::InMemoryServerDirectory;
use huddle_app::config::AppConfig;
use huddle_core::types::{InviteOutcome, Server};

use super::{console_builder, InviteArgs};

pub async fn redeem(config: &AppConfig, args: InviteArgs) -> anyhow::Result<()> {
    let servers = args
        .servers
        .into_iter()
        .map(|(id, invite_code)| Server {
            name: id.clone(),
            id,
            image_url: String::new(),
            invite_code,
            profile_id: String::new(),
        })
        .collect();
    let app = console_builder(config)?
        .server_directory(Arc::new(InMemoryServerDirectory::with_servers(servers)))
        .build()?;

    let outcome = app.invite_service.redeem(&args.code).await?;
    match &outcome {
        InviteOutcome::SignInRequired => log::warn!("no profile configured; sign in first"),
        InviteOutcome::Redirect { server_id, joined: true } => {
            log::info!("joined server {server_id}");
        }
        InviteOutcome::Invalid => log::warn!("invite code {} is not valid", args.code),
        _ => {}
    }
    println!("-> {}", outcome.location());
    Ok(())
}
