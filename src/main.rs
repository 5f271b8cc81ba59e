//! Team Roster Server
//!
//! Entry point for the roster application.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use team_roster::client::HttpFetcher;
use team_roster::config::{AppConfig, Cli, Command};
use team_roster::server;
use team_roster::ui::{Page, render_page};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present) before anything reads the environment
    let _ = dotenv();

    // Initialize tracing (M-LOG-STRUCTURED); stdout stays clean for `render`
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match AppConfig::from_cli(&cli) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        None | Some(Command::Serve) => server::start_server(config).await,
        Some(Command::Render { page }) => render(&config, page).await,
    }
}

/// Mount `page` against the configured server and print its HTML.
async fn render(config: &AppConfig, page: Page) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::from_config(&config.client)?;
    tracing::info!(
        name: "render.started",
        base_url = %fetcher.base_url(),
        page = ?page,
        "Rendering page"
    );

    // The fetcher gives up after the request timeout, so waiting that long
    // always observes a settled fetch.
    let wait = Duration::from_secs(config.client.request_timeout_secs);
    let html = render_page(page, Arc::new(fetcher), wait).await;
    println!("{html}");
    Ok(())
}
