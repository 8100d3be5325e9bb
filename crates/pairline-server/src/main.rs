//! pairline-server: HTTP front end for the conversation log.
//!
//! Clients post messages; each one either opens a turn or answers the open
//! one. A turn left unanswered for a minute gets a placeholder reply.

mod api;
mod protocol;
mod server;


use std::path::PathBuf;

use clap::Parser;
use pairline_common::PairlineError;
use pairline_config::{LogLevel, PairlineConfig};
use pairline_core::ConversationLog;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "pairline-server", about = "Turn-pairing message service")]
struct Args {
    /// Path to a TOML config file. Defaults to the platform config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind, overriding the config file.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

impl Args {
    fn load_config(&self) -> Result<PairlineConfig, PairlineError> {
        let mut config = match &self.config {
            Some(path) => pairline_config::load_from_path(path)?,
            None => pairline_config::load_default()?,
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        pairline_config::validation::validate(&config)?;
        Ok(config)
    }
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

fn level_filter(level: LogLevel) -> EnvFilter {
    let level = level.as_filter();
    EnvFilter::new(format!(
        "pairline_server={level},pairline_core={level},pairline_config={level}"
    ))
}

/// Install the subscriber before anything else logs.
///
/// `RUST_LOG` wins when set. Otherwise the default level is used until the
/// config is read, and the returned handle swaps in the configured one.
fn init_tracing() -> Option<FilterHandle> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
        return None;
    }

    let (filter, handle) = reload::Layer::new(level_filter(LogLevel::default()));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
    Some(handle)
}

#[tokio::main]
async fn main() -> Result<(), PairlineError> {
    let args = Args::parse();
    let filter_handle = init_tracing();
    let config = args.load_config()?;

    if let Some(handle) = filter_handle {
        if let Err(e) = handle.reload(level_filter(config.logging.level)) {
            tracing::warn!(error = %e, "Failed to apply configured log level");
        }
    }

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("pairline-server listening on {}", addr);

    let log = ConversationLog::new();
    server::serve(listener, log, server::shutdown_signal()).await?;

    tracing::info!("pairline-server stopped");
    Ok(())
}
