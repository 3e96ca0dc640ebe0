// src/main.rs
mod cli;
mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod pages;
mod routes;
mod services;
mod templates;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::SiteError;
use crate::middleware::cache::PageCache;
use crate::routes::create_router;
use crate::services::catalog::ContentCatalog;
use crate::services::clipboard::{ClipboardBackend, CopyButton, NoClipboard, SystemClipboard};
use crate::services::health::{check_site, IntegrityReport};
use crate::services::links::LinkRegistry;
use crate::services::renderer::PageRenderer;
use anyhow::{bail, Context};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub renderer: PageRenderer,
    pub cache: PageCache,
    pub report: IntegrityReport,
}

impl AppState {
    /// Load the registry and catalog and run the integrity check. Nothing is
    /// served unless every page renders in every locale.
    pub fn build(config: Config) -> Result<Self, SiteError> {
        let links = Arc::new(LinkRegistry::official(&config.hub_base_url)?);
        let catalog = Arc::new(ContentCatalog::builtin()?);
        let renderer = PageRenderer::new(links, catalog);
        let report = check_site(&renderer, &config.static_dir)?;
        let cache = PageCache::new(config.page_cache_capacity);

        Ok(Self {
            config,
            renderer,
            cache,
            report,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env first so RUST_LOG from it is honored.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    match cli.into_command() {
        Commands::Serve => serve(config).await,
        Commands::Check => check(config),
        Commands::Links => list_links(&config),
        Commands::Copy { id, explorer } => copy_link(&config, &id, explorer).await,
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("🚀 Starting WAOC site server...");

    let addr = config
        .server_addr()
        .with_context(|| format!("Invalid HOST/PORT: {}:{}", config.host, config.port))?;
    tracing::info!("🔗 One Mission hub: {}", config.hub_base_url);

    let state = Arc::new(AppState::build(config)?);
    tracing::info!(
        "✓ Site verified: {} pages x {} locales, {} official links",
        state.report.pages,
        state.report.locales,
        state.report.links
    );

    if state.config.enable_hsts {
        tracing::info!("🔒 HSTS enabled");
    } else if cfg!(not(debug_assertions)) {
        tracing::warn!("⚠️  ENABLE_HSTS is not set in production mode");
    }

    let app = create_router(state.clone());

    tracing::info!("✅ WAOC site listening on {}", addr);
    tracing::info!("🌐 Web UI: http://{}", addr);
    tracing::info!("🔌 API: http://{}/api", addr);
    tracing::info!("📁 Static files: {}", state.config.static_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn check(config: Config) -> anyhow::Result<()> {
    let state = AppState::build(config)?;
    println!("{}", serde_json::to_string_pretty(&state.report)?);
    Ok(())
}

fn list_links(config: &Config) -> anyhow::Result<()> {
    let links = LinkRegistry::official(&config.hub_base_url)?;
    for entry in links.iter() {
        let explorer = entry.explorer_url().unwrap_or_default();
        println!("{:<24} {:<10} {}  {}", entry.id, entry.group.as_str(), entry.value, explorer);
    }
    Ok(())
}

async fn copy_link(config: &Config, id: &str, explorer: bool) -> anyhow::Result<()> {
    let links = LinkRegistry::official(&config.hub_base_url)?;
    let entry = links.get(id)?;
    if entry.is_placeholder() {
        bail!("`{}` has no official value yet", id);
    }

    let text = if explorer {
        links.explorer_url(id)?
    } else {
        entry.value.clone()
    };

    let button = CopyButton::new("Copy", "Copied");
    let outcome = button.press(clipboard_backend().as_ref(), &text).await;
    if outcome.success {
        println!("{} {}: {}", button.label(), entry.label, text);
    } else {
        // Not an error: print the value so it can be copied by hand.
        println!("Clipboard unavailable, value: {}", text);
    }
    Ok(())
}

/// Headless Linux sessions have no clipboard to talk to.
fn clipboard_backend() -> Box<dyn ClipboardBackend> {
    let headless = cfg!(target_os = "linux")
        && std::env::var_os("DISPLAY").is_none()
        && std::env::var_os("WAYLAND_DISPLAY").is_none();
    if headless {
        Box::new(NoClipboard)
    } else {
        Box::new(SystemClipboard::default())
    }
}
