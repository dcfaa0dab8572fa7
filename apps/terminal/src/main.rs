use std::{io::IsTerminal, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{ConnectionController, HttpTransport, Renderer, SessionToken};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::Mutex,
    task::JoinSet,
};
use tracing_subscriber::EnvFilter;

mod config;
mod view;

use config::{load_settings, DEFAULT_CONFIG_PATH};
use view::TerminalView;

/// Line-oriented client for a local command server.
#[derive(Parser, Debug)]
struct Args {
    /// Port of the local server to connect to on startup.
    #[arg(long)]
    port: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config);
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(secs) = args.request_timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }
    init_tracing(&settings.log_filter);

    let transport = match settings.request_timeout_secs {
        Some(secs) => HttpTransport::with_timeout(Duration::from_secs(secs))
            .context("failed to build HTTP client")?,
        None => HttpTransport::new(),
    };
    let view = TerminalView::new(std::io::stdout(), std::io::stdin().is_terminal());
    let controller = Arc::new(ConnectionController::new(
        Arc::new(transport),
        SessionToken::current().clone(),
        Arc::new(Mutex::new(Renderer::new(view))),
    ));

    controller.bootstrap(&settings.port).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut inflight = JoinSet::new();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        {
            let mut renderer = controller.renderer().lock().await;
            renderer.surface_mut().discard_typed_line();
            renderer.render_command_echo(&line);
        }

        let controller = Arc::clone(&controller);
        inflight.spawn(async move { controller.dispatch(&line).await });
        while inflight.try_join_next().is_some() {}
    }

    while inflight.join_next().await.is_some() {}
    Ok(())
}
