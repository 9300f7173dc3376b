//! botchat - chat with a hosted bot from the terminal
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;
use std::sync::Arc;

use botchat_app::config::{load_settings, storage_dir};
use botchat_app::Stores;
use botchat_gateway::HttpGateway;
use clap::Parser;
use color_eyre::eyre::{bail, WrapErr};
use tracing::info;

/// botchat - chat with a hosted bot from the terminal
#[derive(Parser, Debug)]
#[command(name = "botchat", version)]
#[command(about = "Chat with a hosted bot from the terminal", long_about = None)]
struct Args {
    /// Id of the bot to chat with
    #[arg(value_name = "BOT_ID")]
    bot_id: String,

    /// Backend API base URL (overrides BOTCHAT_BASE_URL and the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for the stored credential and preferences
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Run in headless mode (NDJSON events on stdout, commands on stdin)
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let bot_id = args.bot_id.trim();
    if bot_id.is_empty() {
        bail!("BOT_ID must not be empty");
    }

    botchat_core::logging::init().wrap_err("Failed to initialize logging")?;

    // CLI flags > BOTCHAT_BASE_URL > config file > defaults
    let mut settings = load_settings(args.config.as_deref());
    if let Some(base_url) = args.base_url {
        settings.backend.base_url = base_url;
    }
    if let Some(dir) = args.data_dir {
        settings.storage.dir = Some(dir);
    }

    let stores = Stores::new(storage_dir(&settings));
    let gateway = HttpGateway::new(
        &settings.backend.base_url,
        settings.backend.request_timeout(),
    )
    .wrap_err_with(|| format!("Invalid backend URL {}", settings.backend.base_url))?;
    let gateway = Arc::new(gateway);
    info!("Using backend {}", settings.backend.base_url);

    if args.headless {
        botchat::run_headless(bot_id, settings, stores, gateway).await?;
    } else {
        botchat::run(bot_id, settings, stores, gateway).await?;
    }
    Ok(())
}
