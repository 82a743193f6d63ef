use clap::{Parser, Subcommand};

use crate::auth::password;
use crate::database::models::user::CreateUserRequest;
use crate::services::{UserService, VideoService};
use crate::youtube::{check_watched_channels, import_playlist, YouTubeDataApi};

#[derive(Parser)]
#[command(name = "vidcat")]
#[command(about = "Vidcat CLI - administrative tasks for the video catalog")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create an administrator account")]
    CreateAdmin {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    #[command(about = "Import a YouTube playlist into the catalog")]
    Import {
        #[arg(help = "Playlist URL or bare playlist id")]
        playlist_url: String,
    },

    #[command(about = "Re-import watched channels whose check window elapsed")]
    CheckChannels,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => create_admin(username, email, password).await,
        Commands::Import { playlist_url } => import(&playlist_url).await,
        Commands::CheckChannels => check_channels().await,
    }
}

async fn create_admin(username: String, email: String, password: String) -> anyhow::Result<()> {
    let payload = CreateUserRequest {
        username,
        email,
        password,
        is_admin: true,
    };
    payload.validate()?;

    let hashed = password::hash(&payload.password)?;
    let users = UserService::new().await?;
    let user = users
        .create(&payload.username, &payload.email, &hashed, true)
        .await?;

    println!("Created administrator {} (id {})", user.username, user.id);
    Ok(())
}

async fn import(playlist_url: &str) -> anyhow::Result<()> {
    let source = YouTubeDataApi::from_config()?;
    let videos = VideoService::new().await?;
    let summary = import_playlist(&source, &videos, playlist_url).await?;

    println!(
        "Imported {} new, updated {}, {} failed ({} items total)",
        summary.imported, summary.updated, summary.failed, summary.total
    );
    Ok(())
}

async fn check_channels() -> anyhow::Result<()> {
    let source = YouTubeDataApi::from_config()?;
    let results = check_watched_channels(&source).await?;

    if results.is_empty() {
        println!("No channels due for a check");
        return Ok(());
    }

    for result in results {
        match (result.summary, result.error) {
            (Some(summary), _) => println!(
                "{}: {} new, {} updated, {} failed",
                result.channel_id, summary.imported, summary.updated, summary.failed
            ),
            (None, Some(error)) => println!("{}: failed ({})", result.channel_id, error),
            (None, None) => println!("{}: no result", result.channel_id),
        }
    }
    Ok(())
}
