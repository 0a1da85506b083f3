//! CLI entry point - the composition root.
//!
//! Each query command launches the Turbo Push binary, waits for its
//! handshake, performs the API call, and shuts the service down again.
//! `run` keeps the service up until Ctrl-C for interactive use.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use turbopush_client::{ContentType, PlatformQuery, PublishStatus, RecordQuery, TurboPushClient};
use turbopush_runtime::{HostInfo, PlatformKey, ServiceLauncher, resolve};

#[derive(Parser)]
#[command(name = "turbopush", version, about = "Launch and drive the Turbo Push publishing service")]
struct Cli {
    /// Directory to search for the Turbo Push binary
    #[arg(long, global = true, default_value = ".", env = "TURBO_PUSH_DIR")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show host platform details and which binary would be launched
    Info,
    /// Start the service, print its handshake, and keep it running until Ctrl-C
    Run,
    /// List publishing platforms
    Platforms {
        /// Only platforms with login enabled
        #[arg(long)]
        enable: bool,
        /// Only platforms supporting article publishing
        #[arg(long)]
        article: bool,
        /// Only platforms supporting graph-text publishing
        #[arg(long)]
        graph_text: bool,
        /// Only platforms supporting video publishing
        #[arg(long)]
        video: bool,
    },
    /// List every account the service knows about
    Accounts,
    /// List accounts with a live platform session
    Logged,
    /// List publish records
    Records {
        /// Publish status filter: 1 publishing, 2 all failed, 3 partial, 4 all succeeded
        #[arg(long)]
        status: Option<u8>,
        /// Content type filter: 1 article, 2 graph-text, 3 video
        #[arg(long = "type")]
        content_type: Option<u8>,
        /// Records per page
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one publish record in detail
    Record {
        /// Publish record ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for structured logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info => print_info(&cli.dir),
        Commands::Run => run_service(&cli.dir).await,
        Commands::Platforms {
            enable,
            article,
            graph_text,
            video,
        } => {
            let query = PlatformQuery {
                enable: enable.then_some(true),
                article: article.then_some(true),
                graph_text: graph_text.then_some(true),
                video: video.then_some(true),
            };
            with_service(&cli.dir, |client| async move {
                print_json(&client.platforms(&query).await?)
            })
            .await
        }
        Commands::Accounts => {
            with_service(&cli.dir, |client| async move {
                let accounts = client.accounts().await?;
                print_json(&serde_json::to_value(
                    accounts.iter().map(account_summary).collect::<Vec<_>>(),
                )?)
            })
            .await
        }
        Commands::Logged => {
            with_service(&cli.dir, |client| async move {
                let accounts = client.logged_accounts().await?;
                print_json(&serde_json::to_value(
                    accounts.iter().map(account_summary).collect::<Vec<_>>(),
                )?)
            })
            .await
        }
        Commands::Records {
            status,
            content_type,
            size,
            page,
        } => {
            let query = RecordQuery {
                status: status.map(parse_status).transpose()?,
                content_type: content_type.map(parse_content_type).transpose()?,
                size,
                page,
            };
            with_service(&cli.dir, |client| async move {
                print_json(&client.records(&query).await?)
            })
            .await
        }
        Commands::Record { id } => {
            with_service(&cli.dir, |client| async move {
                print_json(&client.record_info(&id).await?)
            })
            .await
        }
    }
}

/// Launch the service, hand a client to `f`, and always stop the service
/// afterwards, even when the call failed.
async fn with_service<F, Fut>(dir: &Path, f: F) -> Result<()>
where
    F: FnOnce(TurboPushClient) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut launcher = ServiceLauncher::discover(dir);
    launcher
        .start()
        .await
        .context("failed to start the Turbo Push service")?;
    let client = launcher.client()?;

    let result = f(client).await;
    launcher.stop().await;
    result
}

fn print_info(dir: &Path) -> Result<()> {
    let host = HostInfo::gather();
    println!("OS:          {} ({})", host.platform.os, host.os);
    println!("Arch:        {} ({})", host.platform.arch, host.arch);
    if let Some(cwd) = &host.working_dir {
        println!("Working dir: {}", cwd.display());
    }
    println!("Version:     {}", host.version);

    let resolution = resolve(dir, PlatformKey::host());
    if resolution.found {
        println!("Binary:      {}", resolution.path.display());
    } else {
        warn!(path = %resolution.path.display(), "no binary found in search directory");
        println!("Binary:      {} (not found, best guess)", resolution.path.display());
    }
    Ok(())
}

async fn run_service(dir: &Path) -> Result<()> {
    let mut launcher = ServiceLauncher::discover(dir);
    let config = launcher
        .start()
        .await
        .context("failed to start the Turbo Push service")?;

    print_json(&serde_json::to_value(&config)?)?;
    info!(port = config.port, "service running, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    launcher.stop().await;
    Ok(())
}

fn account_summary(account: &turbopush_client::Account) -> serde_json::Value {
    let mut summary = serde_json::json!({
        "plat_type": account.platform.plat_type,
    });
    if let Some(name) = turbopush_client::platform_display_name(&account.platform.plat_type) {
        summary["platform_name"] = name.into();
    }
    for key in ["name", "nickname", "id"] {
        if let Some(value) = account.extra.get(key) {
            summary[key] = value.clone();
        }
    }
    summary
}

fn parse_status(raw: u8) -> Result<PublishStatus> {
    Ok(match raw {
        1 => PublishStatus::Publishing,
        2 => PublishStatus::AllFailed,
        3 => PublishStatus::PartialSuccess,
        4 => PublishStatus::AllSucceeded,
        other => bail!("invalid publish status {other}, expected 1-4"),
    })
}

fn parse_content_type(raw: u8) -> Result<ContentType> {
    Ok(match raw {
        1 => ContentType::Article,
        2 => ContentType::GraphText,
        3 => ContentType::Video,
        other => bail!("invalid content type {other}, expected 1-3"),
    })
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
