//! Atrium - GraphQL API over registered scripts, stylesheets and user avatars.
//!
//! # Usage
//!
//! ```bash
//! # Start with an empty registry
//! atrium
//!
//! # Seed the registries from a manifest and cap page sizes
//! ATRIUM_MANIFEST=./atrium.sample.json MAX_PAGE_SIZE=100 atrium
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use atrium_core::metrics::init_metrics;
use atrium_core::models::AssetKind;
use atrium_core::services::{
    AvatarConfig, AvatarService, ConflictPolicy, GravatarProvider, PagerConfig,
};
use atrium_graphql::{build_schema, serve_with_shutdown, ServerConfig};
use atrium_storage::MemoryStore;

/// Atrium CLI.
#[derive(Parser, Debug)]
#[command(name = "atrium")]
#[command(about = "Atrium - GraphQL API over registered assets and user avatars")]
#[command(version)]
struct Cli {
    /// Address the GraphQL server binds to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// GraphQL server port.
    #[arg(long, env = "GRAPHQL_PORT", default_value = "4000")]
    port: u16,

    /// Prometheus metrics port.
    #[arg(long, env = "METRICS_PORT", default_value = "9090")]
    metrics_port: u16,

    /// JSON manifest seeding scripts, stylesheets and users.
    #[arg(long, env = "ATRIUM_MANIFEST")]
    manifest: Option<std::path::PathBuf>,

    /// Upper bound applied to `first`/`last`. Unbounded when unset.
    #[arg(long, env = "MAX_PAGE_SIZE", value_parser = clap::value_parser!(u32).range(1..))]
    max_page_size: Option<u32>,

    /// Reject requests supplying both `first` and `last` instead of using `first`.
    #[arg(long, env = "REJECT_CONFLICTING_PAGINATION")]
    reject_conflicting_pagination: bool,

    /// Base URL of the Gravatar-compatible avatar service.
    #[arg(
        long,
        env = "AVATAR_BASE_URL",
        default_value = "https://secure.gravatar.com/avatar"
    )]
    avatar_base_url: Url,

    /// Default avatar image keyword.
    #[arg(long, env = "AVATAR_DEFAULT", default_value = "mm")]
    avatar_default: String,

    /// Disable the GraphiQL playground.
    #[arg(long, env = "NO_PLAYGROUND")]
    no_playground: bool,

    /// Enable JSON log output.
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn pager_config(&self) -> PagerConfig {
        PagerConfig {
            max_page_size: self.max_page_size.map(|n| n as usize),
            conflict_policy: if self.reject_conflicting_pagination {
                ConflictPolicy::Reject
            } else {
                ConflictPolicy::PreferFirst
            },
        }
    }

    fn avatar_config(&self) -> AvatarConfig {
        AvatarConfig {
            base_url: self.avatar_base_url.to_string(),
            default_image: self.avatar_default.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    // Prometheus metrics exporter (optional - failures don't crash the app)
    let metrics_enabled =
        match format!("0.0.0.0:{}", cli.metrics_port).parse::<std::net::SocketAddr>() {
            Ok(metrics_addr) => {
                match PrometheusBuilder::new()
                    .with_http_listener(metrics_addr)
                    .install()
                {
                    Ok(()) => {
                        init_metrics();
                        true
                    }
                    Err(e) => {
                        warn!(
                            "⚠️  Failed to start metrics exporter: {}. Continuing without metrics.",
                            e
                        );
                        false
                    }
                }
            }
            Err(e) => {
                warn!("⚠️  Invalid metrics address: {}. Continuing without metrics.", e);
                false
            }
        };

    // ─────────────────────────────────────────────────────────────────────────
    // 🚀 STARTUP
    // ─────────────────────────────────────────────────────────────────────────
    info!("🚀 Starting Atrium");
    let pager = cli.pager_config();
    debug!(
        max_page_size = ?pager.max_page_size,
        conflict_policy = ?pager.conflict_policy,
        "Pagination settings"
    );

    // ─────────────────────────────────────────────────────────────────────────
    // 📦 REGISTRIES
    // ─────────────────────────────────────────────────────────────────────────
    let store = match &cli.manifest {
        Some(path) => MemoryStore::from_manifest_path(path)
            .await
            .with_context(|| format!("Failed to load manifest {}", path.display()))?,
        None => {
            warn!("⚠️  No manifest given, starting with empty registries");
            MemoryStore::new()
        }
    };
    debug!(
        scripts = store.assets().len(AssetKind::Script).await,
        stylesheets = store.assets().len(AssetKind::Stylesheet).await,
        users = store.users().len().await,
        "Registries ready"
    );

    // ─────────────────────────────────────────────────────────────────────────
    // 🖼️ AVATARS
    // ─────────────────────────────────────────────────────────────────────────
    let avatar_config = cli.avatar_config();
    let provider =
        GravatarProvider::new(&avatar_config).context("Invalid avatar service configuration")?;
    let avatars = AvatarService::new(Arc::new(provider), avatar_config.default_image.clone());
    debug!(base_url = %avatar_config.base_url, "Avatar provider");

    // ─────────────────────────────────────────────────────────────────────────
    // ⚡ SERVER START
    // ─────────────────────────────────────────────────────────────────────────
    let schema = build_schema(store.assets(), store.users(), avatars, pager);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let graphql_config = ServerConfig {
        host: cli.host.clone(),
        port: cli.port,
        enable_playground: !cli.no_playground,
    };

    let graphql_handle = tokio::spawn(
        async move {
            let shutdown_signal = async move {
                while !*shutdown_rx.borrow() {
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            };

            if let Err(e) = serve_with_shutdown(schema, graphql_config, shutdown_signal).await {
                error!(error = %e, "❌ Server error");
            }
            debug!("Server stopped");
        }
        .instrument(info_span!("graphql")),
    );

    // ─────────────────────────────────────────────────────────────────────────
    // ✅ READY
    // ─────────────────────────────────────────────────────────────────────────
    info!("✅ Atrium ready");
    info!("   ⚡ GraphQL:  http://localhost:{}/graphql", cli.port);
    if metrics_enabled {
        info!("   📊 Metrics:  http://localhost:{}/metrics", cli.metrics_port);
    } else {
        info!("   📊 Metrics:  disabled");
    }
    info!("   Press Ctrl+C to stop");

    shutdown_signal().await;

    // ─────────────────────────────────────────────────────────────────────────
    // 🛑 SHUTDOWN
    // ─────────────────────────────────────────────────────────────────────────
    info!("🛑 Shutting down...");
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(std::time::Duration::from_secs(10), graphql_handle).await {
        Ok(_) => debug!("GraphQL stopped"),
        Err(_) => warn!("⚠️  GraphQL shutdown timed out"),
    }

    info!("🛑 Shutdown complete");
    Ok(())
}

/// Initialize tracing subscriber.
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
