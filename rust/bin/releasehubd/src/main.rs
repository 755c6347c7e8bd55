//! `releasehubd` — the release distribution server.
//!
//! Usage:
//!   releasehubd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/releasehub/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use release::ReleaseModule;
use release::service::ReleaseService;
use release::source::{HttpSource, InlineSource, ReleaseSource};
use release::store::SqlReleaseStore;
use releasehub_core::Module;
use tracing::info;

use config::ServerConfig;

/// Release distribution server.
#[derive(Parser, Debug)]
#[command(name = "releasehubd", about = "Release distribution server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;

    let catalog = bootstrap::verify_config(&server_config)?;
    info!(
        "Recognized platforms: {}",
        catalog.ids().collect::<Vec<_>>().join(", ")
    );

    let sql = bootstrap::open_store(&server_config, &catalog)?;
    let store = Arc::new(SqlReleaseStore::new(sql, catalog.clone()));
    let service = Arc::new(ReleaseService::new(
        store,
        catalog,
        server_config.release.display_base_url.clone(),
    ));

    let source: Arc<dyn ReleaseSource> = match &server_config.download.upstream_url {
        Some(url) => {
            info!("Download redirects resolve via {}", url);
            Arc::new(
                HttpSource::new(
                    url.clone(),
                    server_config.auth.api_key.clone(),
                    server_config.download_timeout(),
                )
                .map_err(|e| anyhow::anyhow!("failed to build upstream client: {}", e))?,
            )
        }
        None => Arc::new(InlineSource::new(service.clone())),
    };

    if server_config.auth.api_key.is_some() {
        info!("Shared credential required on /releases");
    }

    let modules: Vec<Box<dyn Module>> = vec![Box::new(ReleaseModule::new(
        service,
        source,
        server_config.release.cache_max_age_secs,
        server_config.auth.api_key.clone(),
    ))];
    let app = routes::build_router(&modules);

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("releasehubd listening on {}", cli.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
