use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use jobboard_server::auth::{StaleIdentityPolicy, decode_secret};
use jobboard_server::config;
use jobboard_server::observability::init_observability;
use jobboard_server::transport::run_http;
use jobboard_server::{MemoryStore, SeedData};

#[derive(Parser, Debug)]
#[command(name = "jobboard-server")]
#[command(about = "GraphQL job board server", long_about = None)]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP bind host
    #[arg(long)]
    host: Option<IpAddr>,

    /// HTTP bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Base64-encoded token signing secret
    #[arg(long)]
    token_secret: Option<String>,

    /// Token lifetime in seconds (0 issues tokens without expiry)
    #[arg(long)]
    token_ttl: Option<u64>,

    /// What to do with valid tokens of deleted users (anonymous, reject)
    #[arg(long)]
    stale_identity: Option<StaleIdentityPolicy>,

    /// JSON seed file with users, companies and jobs
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Allowed CORS origin
    #[arg(long)]
    cors_origin: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable JSON logging output
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Defaults, then file, then env; CLI flags are applied last
    let mut builder = if let Some(ref path) = args.config {
        config::load_config_from_path(path)?
    } else {
        config::load_config()?
    };

    if let Some(host) = args.host {
        builder = builder.http_host(host);
    }

    if let Some(port) = args.port {
        builder = builder.http_port(port);
    }

    if let Some(ref encoded) = args.token_secret {
        let secret =
            decode_secret(encoded).map_err(|e| anyhow::anyhow!("Invalid --token-secret: {e}"))?;
        builder = builder.token_secret(secret);
    }

    if let Some(ttl) = args.token_ttl {
        builder = builder.token_ttl((ttl > 0).then(|| Duration::from_secs(ttl)));
    }

    if let Some(policy) = args.stale_identity {
        builder = builder.stale_identity(policy);
    }

    if let Some(seed) = args.seed {
        builder = builder.seed_path(seed);
    }

    if let Some(origin) = args.cors_origin {
        builder = builder.cors_origin(origin);
    }

    if args.verbose {
        builder = builder.log_level("debug".to_string());
    }

    if args.json_logs {
        builder = builder.json_logs(true);
    }

    let config = builder.build()?;

    init_observability(&config.telemetry)?;

    let seed = match config.seed_path {
        Some(ref path) => SeedData::from_path(path)?,
        None => {
            tracing::warn!("No seed file configured, using built-in demo data");
            SeedData::demo()
        }
    };
    let store = Arc::new(MemoryStore::new(seed));

    tracing::info!("Starting job board server");
    tracing::info!("Token expiry: {:?}", config.auth.ttl);
    tracing::info!("Stale identity policy: {:?}", config.auth.stale_identity);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received");
    };

    run_http(&config, store, shutdown).await.map_err(Into::into)
}
