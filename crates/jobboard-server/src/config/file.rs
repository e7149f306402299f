//! TOML configuration file loading

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::builder::ConfigBuilder;
use crate::auth::{StaleIdentityPolicy, decode_secret};
use crate::{Error, Result};

/// Configuration file locations checked in order
const CONFIG_PATHS: &[&str] = &[
    "./jobboard.toml",
    "~/.config/jobboard/config.toml",
    "/etc/jobboard/config.toml",
];

/// Find the first existing configuration file
pub fn find_config_file() -> Option<PathBuf> {
    for path_str in CONFIG_PATHS {
        let path = if path_str.starts_with('~') {
            if let Ok(home) = std::env::var("HOME") {
                PathBuf::from(path_str.replacen('~', &home, 1))
            } else {
                continue;
            }
        } else {
            PathBuf::from(path_str)
        };

        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path, builder: ConfigBuilder) -> Result<ConfigBuilder> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    let file_config: FileConfig = toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })?;

    apply_file_config(builder, file_config)
}

fn apply_file_config(mut builder: ConfigBuilder, config: FileConfig) -> Result<ConfigBuilder> {
    if let Some(http) = config.http {
        if let Some(host_str) = http.host {
            let host = host_str
                .parse::<IpAddr>()
                .map_err(|e| Error::Config(format!("Invalid http.host {host_str}: {e}")))?;
            builder = builder.http_host(host);
        }

        if let Some(port) = http.port {
            builder = builder.http_port(port);
        }

        if let Some(origin) = http.cors_origin {
            builder = builder.cors_origin(origin);
        }

        if let Some(timeout) = http.request_timeout_secs {
            builder = builder.request_timeout(Duration::from_secs(timeout));
        }
    }

    if let Some(auth) = config.auth {
        if let Some(encoded) = auth.secret {
            let secret = decode_secret(&encoded)
                .map_err(|e| Error::Config(format!("Invalid auth.secret: {e}")))?;
            builder = builder.token_secret(secret);
        }

        if let Some(raw) = auth.secret_raw {
            builder = builder.token_secret(raw.into_bytes());
        }

        if let Some(ttl) = auth.token_ttl_secs {
            builder = builder.token_ttl((ttl > 0).then(|| Duration::from_secs(ttl)));
        }

        if let Some(policy_str) = auth.stale_identity {
            let policy: StaleIdentityPolicy = policy_str
                .parse()
                .map_err(|e| Error::Config(format!("Invalid auth.stale_identity: {e}")))?;
            builder = builder.stale_identity(policy);
        }
    }

    if let Some(store) = config.store
        && let Some(seed) = store.seed_path
    {
        builder = builder.seed_path(seed);
    }

    if let Some(obs) = config.observability {
        if let Some(level) = obs.log_level {
            builder = builder.log_level(level);
        }

        if let Some(json) = obs.json_logs {
            builder = builder.json_logs(json);
        }
    }

    Ok(builder)
}

/// Root configuration file structure
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    http: Option<HttpFileConfig>,
    auth: Option<AuthFileConfig>,
    store: Option<StoreFileConfig>,
    observability: Option<ObservabilityConfig>,
}

#[derive(Debug, Deserialize)]
struct HttpFileConfig {
    host: Option<String>,
    port: Option<u16>,
    cors_origin: Option<String>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct AuthFileConfig {
    /// Base64-encoded secret
    secret: Option<String>,
    secret_raw: Option<String>,
    token_ttl_secs: Option<u64>,
    stale_identity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StoreFileConfig {
    seed_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ObservabilityConfig {
    log_level: Option<String>,
    json_logs: Option<bool>,
}
