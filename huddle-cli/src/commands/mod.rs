//! Subcommand implementations
//!
//! Every modal command follows the shell's flow: open the modal, mount its
//! form, drop the file (if any), submit.

pub mod channel;
pub mod console;
pub mod invite;
pub mod message;
pub mod server;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use huddle_app::config::AppConfig;
use huddle_app::{AppState, AppStateBuilder};
use huddle_core::services::{ModalForm, ModalInstance};
use huddle_core::types::{CandidateFile, ChannelType, ModalKind, ModalPayload, UploadStatus};

use self::console::{ConsoleNotifier, ConsolePage};

#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Server name
    #[arg(long)]
    pub name: String,
    /// Server image (jpg, png, gif, webp)
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EditServerArgs {
    /// Server ID
    #[arg(long)]
    pub id: String,
    /// New name
    #[arg(long)]
    pub name: String,
    /// Image currently shown for the server
    #[arg(long, value_name = "URL")]
    pub current_image: Option<String>,
    /// Replacement image
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ChannelArgs {
    /// Server the channel belongs to
    #[arg(long)]
    pub server_id: String,
    /// Channel name
    #[arg(long)]
    pub name: String,
    /// text, audio or video
    #[arg(long = "type", default_value = "text")]
    pub channel_type: ChannelType,
}

#[derive(Args, Debug)]
pub struct AttachmentArgs {
    /// Endpoint the message is posted to, e.g. /api/socket/messages
    #[arg(long)]
    pub api_url: String,
    /// Query parameters as KEY=VALUE (repeatable)
    #[arg(long = "query", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub query: Vec<(String, String)>,
    /// File to attach (image or PDF)
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct InviteArgs {
    /// Invite code
    pub code: String,
    /// Known server as ID=INVITE_CODE (repeatable)
    #[arg(long = "server", value_name = "ID=CODE", value_parser = parse_pair)]
    pub servers: Vec<(String, String)>,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// `AppState` from config, reporting to the console.
pub fn app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    Ok(console_builder(config)?.build()?)
}

pub fn console_builder(config: &AppConfig) -> anyhow::Result<AppStateBuilder> {
    Ok(AppStateBuilder::from_config(config)?
        .notifier(Arc::new(ConsoleNotifier))
        .page_refresher(Arc::new(ConsolePage)))
}

/// Open `kind` with `payload` and mount `form`.
pub fn open_modal<F: ModalForm>(
    app: &AppState,
    kind: ModalKind,
    payload: ModalPayload,
    form: F,
) -> ModalInstance<F> {
    app.modal().open(kind, payload);
    app.mount(form)
}

/// Drop `path` into the modal's dropzone and print upload progress as it goes.
pub async fn drop_file<F: ModalForm>(modal: &ModalInstance<F>, path: &Path) -> anyhow::Result<()> {
    let file = CandidateFile::from_path(path).await?;
    log::info!("selected {} ({}, {} bytes)", file.name, file.mime_type, file.size());
    modal.drop_file(file).await?;

    if let Some(session) = modal.session() {
        let mut rx = session.subscribe();
        tokio::spawn(async move {
            let mut last = 0;
            while rx.changed().await.is_ok() {
                let (status, pct) = {
                    let state = rx.borrow_and_update();
                    (state.status(), state.progress_pct())
                };
                if status == UploadStatus::Uploading && pct != last {
                    eprintln!("uploading... {pct}%");
                    last = pct;
                }
            }
        });
    }
    Ok(())
}

/// Submit and print the backend's response.
pub async fn submit<F: ModalForm>(mut modal: ModalInstance<F>) -> anyhow::Result<()> {
    let response = modal.submit().await?;
    if !response.is_null() {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_pairs() {
        assert_eq!(
            parse_pair("channelId=c1").unwrap(),
            ("channelId".to_string(), "c1".to_string())
        );
        assert_eq!(
            parse_pair("token=a=b").unwrap(),
            ("token".to_string(), "a=b".to_string())
        );
        assert!(parse_pair("missing").is_err());
        assert!(parse_pair("=value").is_err());
    }
}
