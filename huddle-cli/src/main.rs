//! Huddle command-line front end
//!
//! Drives the same modal flows as the web shell: each subcommand opens a
//! modal, fills its form, optionally drops a file and submits.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use huddle_app::config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{AttachmentArgs, ChannelArgs, EditServerArgs, InviteArgs, ServerArgs};

#[derive(Parser, Debug)]
#[command(name = "huddle")]
#[command(about = "Create servers and channels, send attachments and redeem invites")]
#[command(version)]
struct Cli {
    /// Config file (defaults to <config dir>/huddle/config.toml)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a server, optionally with an image
    CreateServer(ServerArgs),
    /// Rename a server or replace its image
    EditServer(EditServerArgs),
    /// Delete a server
    DeleteServer {
        /// Server ID
        #[arg(long)]
        id: String,
    },
    /// Create a channel in a server
    CreateChannel(ChannelArgs),
    /// Upload a file and post it as a message
    SendAttachment(AttachmentArgs),
    /// Join a server through its invite code
    RedeemInvite(InviteArgs),
    /// Print the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::CreateServer(args) => commands::server::create(&config, args).await,
        Command::EditServer(args) => commands::server::edit(&config, args).await,
        Command::DeleteServer { id } => commands::server::delete(&config, id).await,
        Command::CreateChannel(args) => commands::channel::create(&config, args).await,
        Command::SendAttachment(args) => commands::message::send_attachment(&config, args).await,
        Command::RedeemInvite(args) => commands::invite::redeem(&config, args).await,
        Command::ShowConfig => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
