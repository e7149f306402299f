//! Environment variable loading for configuration

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigBuilder;
use crate::auth::{StaleIdentityPolicy, decode_secret};
use crate::{Error, Result};

/// Environment variable names
mod vars {
    pub const JOBBOARD_HTTP_HOST: &str = "JOBBOARD_HTTP_HOST";
    pub const JOBBOARD_HTTP_PORT: &str = "JOBBOARD_HTTP_PORT";
    pub const JOBBOARD_CORS_ORIGIN: &str = "JOBBOARD_CORS_ORIGIN";
    pub const JOBBOARD_REQUEST_TIMEOUT_SECS: &str = "JOBBOARD_REQUEST_TIMEOUT_SECS";
    pub const JOBBOARD_TOKEN_SECRET: &str = "JOBBOARD_TOKEN_SECRET";
    pub const JOBBOARD_TOKEN_SECRET_RAW: &str = "JOBBOARD_TOKEN_SECRET_RAW";
    pub const JOBBOARD_TOKEN_TTL_SECS: &str = "JOBBOARD_TOKEN_TTL_SECS";
    pub const JOBBOARD_STALE_IDENTITY: &str = "JOBBOARD_STALE_IDENTITY";
    pub const JOBBOARD_SEED_PATH: &str = "JOBBOARD_SEED_PATH";
    pub const RUST_LOG: &str = "RUST_LOG";
    pub const JOBBOARD_JSON_LOGS: &str = "JOBBOARD_JSON_LOGS";
}

/// Load configuration from environment variables
pub fn load_from_env(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    // HTTP
    if let Ok(host_str) = env::var(vars::JOBBOARD_HTTP_HOST)
        && let Ok(host) = host_str.parse::<IpAddr>()
    {
        builder = builder.http_host(host);
    }

    if let Ok(port_str) = env::var(vars::JOBBOARD_HTTP_PORT)
        && let Ok(port) = port_str.parse::<u16>()
    {
        builder = builder.http_port(port);
    }

    if let Ok(origin) = env::var(vars::JOBBOARD_CORS_ORIGIN) {
        builder = builder.cors_origin(origin);
    }

    if let Ok(timeout_str) = env::var(vars::JOBBOARD_REQUEST_TIMEOUT_SECS)
        && let Ok(secs) = timeout_str.parse::<u64>()
    {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }

    // Tokens; the raw form wins when both are set
    if let Ok(encoded) = env::var(vars::JOBBOARD_TOKEN_SECRET) {
        let secret = decode_secret(&encoded).map_err(|e| {
            Error::Config(format!("Invalid {}: {e}", vars::JOBBOARD_TOKEN_SECRET))
        })?;
        builder = builder.token_secret(secret);
    }

    if let Ok(raw) = env::var(vars::JOBBOARD_TOKEN_SECRET_RAW) {
        builder = builder.token_secret(raw.into_bytes());
    }

    if let Ok(ttl_str) = env::var(vars::JOBBOARD_TOKEN_TTL_SECS) {
        let secs = ttl_str.parse::<u64>().map_err(|e| {
            Error::Config(format!("Invalid {}: {e}", vars::JOBBOARD_TOKEN_TTL_SECS))
        })?;
        builder = builder.token_ttl((secs > 0).then(|| Duration::from_secs(secs)));
    }

    if let Ok(policy_str) = env::var(vars::JOBBOARD_STALE_IDENTITY) {
        let policy: StaleIdentityPolicy = policy_str.parse().map_err(|e| {
            Error::Config(format!("Invalid {}: {e}", vars::JOBBOARD_STALE_IDENTITY))
        })?;
        builder = builder.stale_identity(policy);
    }

    // Store
    if let Ok(path) = env::var(vars::JOBBOARD_SEED_PATH) {
        builder = builder.seed_path(PathBuf::from(path));
    }

    // Telemetry
    if let Ok(level) = env::var(vars::RUST_LOG) {
        builder = builder.log_level(level);
    }

    if let Ok(val) = env::var(vars::JOBBOARD_JSON_LOGS) {
        builder = builder.json_logs(parse_bool(&val));
    }

    Ok(builder)
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

/// Serializes tests that read or mutate the process environment
#[cfg(test)]
pub(super) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use std::sync::PoisonError;

    use super::*;

    const SECRET_B64: &str = "Zn8Q5tyZ/G1MHltc4F/gTkVJMlrbKiZt";

    fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner);

        let old_values: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var(k).ok())).collect();

        for (key, value) in vars {
            // SAFETY: We hold a mutex lock to ensure no concurrent modifications
            unsafe { env::set_var(key, value) };
        }

        let result = f();

        for (key, old_value) in old_values {
            match old_value {
                // SAFETY: We hold a mutex lock to ensure no concurrent modifications
                Some(v) => unsafe { env::set_var(key, v) },
                None => unsafe { env::remove_var(key) },
            }
        }

        result
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("YES"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("off"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_load_token_secret() {
        with_env_vars(&[(vars::JOBBOARD_TOKEN_SECRET, SECRET_B64)], || {
            let config = load_from_env(ConfigBuilder::new()).unwrap().build().unwrap();
            assert_eq!(config.auth.secret.len(), 24);
        });
    }

    #[test]
    fn test_load_invalid_token_secret() {
        with_env_vars(&[(vars::JOBBOARD_TOKEN_SECRET, "%%% not base64")], || {
            let err = load_from_env(ConfigBuilder::new()).unwrap_err();
            assert!(err.is_config());
        });
    }

    #[test]
    fn test_raw_secret_wins() {
        with_env_vars(
            &[
                (vars::JOBBOARD_TOKEN_SECRET, SECRET_B64),
                (vars::JOBBOARD_TOKEN_SECRET_RAW, "plain-text-secret"),
            ],
            || {
                let config = load_from_env(ConfigBuilder::new()).unwrap().build().unwrap();
                assert_eq!(config.auth.secret, b"plain-text-secret");
            },
        );
    }

    #[test]
    fn test_load_http_settings() {
        with_env_vars(
            &[
                (vars::JOBBOARD_TOKEN_SECRET, SECRET_B64),
                (vars::JOBBOARD_HTTP_HOST, "0.0.0.0"),
                (vars::JOBBOARD_HTTP_PORT, "9100"),
                (vars::JOBBOARD_CORS_ORIGIN, "https://jobs.example.com"),
                (vars::JOBBOARD_REQUEST_TIMEOUT_SECS, "12"),
            ],
            || {
                let config = load_from_env(ConfigBuilder::new()).unwrap().build().unwrap();
                assert!(config.http.host.is_unspecified());
                assert_eq!(config.http.port, 9100);
                assert_eq!(
                    config.http.cors_origin.as_deref(),
                    Some("https://jobs.example.com")
                );
                assert_eq!(config.http.request_timeout, Duration::from_secs(12));
            },
        );
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        with_env_vars(
            &[
                (vars::JOBBOARD_TOKEN_SECRET, SECRET_B64),
                (vars::JOBBOARD_HTTP_PORT, "not-a-port"),
            ],
            || {
                let config = load_from_env(ConfigBuilder::new()).unwrap().build().unwrap();
                assert_eq!(config.http.port, 9000);
            },
        );
    }

    #[test]
    fn test_load_token_policy() {
        with_env_vars(
            &[
                (vars::JOBBOARD_TOKEN_SECRET, SECRET_B64),
                (vars::JOBBOARD_TOKEN_TTL_SECS, "3600"),
                (vars::JOBBOARD_STALE_IDENTITY, "reject"),
            ],
            || {
                let config = load_from_env(ConfigBuilder::new()).unwrap().build().unwrap();
                assert_eq!(config.auth.ttl, Some(Duration::from_secs(3600)));
                assert_eq!(config.auth.stale_identity, StaleIdentityPolicy::Reject);
            },
        );
    }

    #[test]
    fn test_zero_ttl_disables_expiry() {
        with_env_vars(
            &[
                (vars::JOBBOARD_TOKEN_SECRET, SECRET_B64),
                (vars::JOBBOARD_TOKEN_TTL_SECS, "0"),
            ],
            || {
                let config = load_from_env(ConfigBuilder::new()).unwrap().build().unwrap();
                assert!(config.auth.ttl.is_none());
            },
        );
    }

    #[test]
    fn test_invalid_stale_identity_policy() {
        with_env_vars(&[(vars::JOBBOARD_STALE_IDENTITY, "sometimes")], || {
            assert!(load_from_env(ConfigBuilder::new()).is_err());
        });
    }

    #[test]
    fn test_load_seed_and_telemetry() {
        with_env_vars(
            &[
                (vars::JOBBOARD_TOKEN_SECRET, SECRET_B64),
                (vars::JOBBOARD_SEED_PATH, "/srv/jobboard/seed.json"),
                (vars::RUST_LOG, "jobboard_server=debug"),
                (vars::JOBBOARD_JSON_LOGS, "true"),
            ],
            || {
                let config = load_from_env(ConfigBuilder::new()).unwrap().build().unwrap();
                assert_eq!(
                    config.seed_path,
                    Some(PathBuf::from("/srv/jobboard/seed.json"))
                );
                assert_eq!(config.telemetry.log_level, "jobboard_server=debug");
                assert!(config.telemetry.json_logs);
            },
        );
    }
}
