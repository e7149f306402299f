//! Configuration builder

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use crate::Error;
use crate::auth::{StaleIdentityPolicy, TokenConfig};
use crate::constants::{DEFAULT_CORS_ORIGIN, DEFAULT_HTTP_PORT};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub http: HttpConfig,
    pub auth: TokenConfig,
    /// JSON seed file; the built-in demo data is used when absent
    pub seed_path: Option<PathBuf>,
    pub telemetry: TelemetryConfig,
}

impl Config {
    #[must_use]
    pub const fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cors_origin: Option<String>,
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_HTTP_PORT,
            cors_origin: Some(DEFAULT_CORS_ORIGIN.to_string()),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json_logs: bool,
}

/// Configuration builder with fluent API
#[derive(Debug)]
pub struct ConfigBuilder {
    http: HttpConfig,
    token_secret: Option<Vec<u8>>,
    token_ttl: Option<Duration>,
    stale_identity: StaleIdentityPolicy,
    seed_path: Option<PathBuf>,
    telemetry: TelemetryConfig,
}

impl ConfigBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            http: HttpConfig {
                host: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: DEFAULT_HTTP_PORT,
                cors_origin: None,
                request_timeout: Duration::from_secs(30),
            },
            token_secret: None,
            token_ttl: None,
            stale_identity: StaleIdentityPolicy::Anonymous,
            seed_path: None,
            telemetry: TelemetryConfig {
                log_level: String::new(),
                json_logs: false,
            },
        }
    }

    #[must_use]
    pub const fn http_host(mut self, host: IpAddr) -> Self {
        self.http.host = host;
        self
    }

    #[must_use]
    pub const fn http_port(mut self, port: u16) -> Self {
        self.http.port = port;
        self
    }

    #[must_use]
    pub fn cors_origin(mut self, origin: String) -> Self {
        self.http.cors_origin = Some(origin);
        self
    }

    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.http.request_timeout = timeout;
        self
    }

    /// Raw HS256 secret bytes
    #[must_use]
    pub fn token_secret(mut self, secret: Vec<u8>) -> Self {
        self.token_secret = Some(secret);
        self
    }

    #[must_use]
    pub const fn token_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.token_ttl = ttl;
        self
    }

    #[must_use]
    pub const fn stale_identity(mut self, policy: StaleIdentityPolicy) -> Self {
        self.stale_identity = policy;
        self
    }

    #[must_use]
    pub fn seed_path(mut self, path: PathBuf) -> Self {
        self.seed_path = Some(path);
        self
    }

    #[must_use]
    pub fn log_level(mut self, level: String) -> Self {
        self.telemetry.log_level = level;
        self
    }

    #[must_use]
    pub const fn json_logs(mut self, enabled: bool) -> Self {
        self.telemetry.json_logs = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> crate::Result<Config> {
        let secret = self
            .token_secret
            .ok_or_else(|| Error::Config("token secret is required".into()))?;

        if secret.is_empty() {
            return Err(Error::Config("token secret is empty".into()));
        }

        let log_level = if self.telemetry.log_level.is_empty() {
            "info".to_string()
        } else {
            self.telemetry.log_level
        };

        Ok(Config {
            http: self.http,
            auth: TokenConfig::new(secret)
                .with_ttl(self.token_ttl)
                .with_stale_identity(self.stale_identity),
            seed_path: self.seed_path,
            telemetry: TelemetryConfig {
                log_level,
                json_logs: self.telemetry.json_logs,
            },
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = ConfigBuilder::new();
        assert_eq!(builder.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(builder.http.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(builder.token_secret.is_none());
        assert_eq!(builder.stale_identity, StaleIdentityPolicy::Anonymous);
    }

    #[test]
    fn test_builder_requires_secret() {
        let err = ConfigBuilder::new().build().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_builder_rejects_empty_secret() {
        let result = ConfigBuilder::new().token_secret(Vec::new()).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_with_secret() {
        let config = ConfigBuilder::new()
            .token_secret(b"0123456789abcdef0123456789abcdef".to_vec())
            .build()
            .unwrap();

        assert_eq!(config.http.port, 9000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.auth.ttl.is_none());
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_builder_fluent_overrides() {
        let config = Config::builder()
            .token_secret(vec![7; 32])
            .token_ttl(Some(Duration::from_secs(900)))
            .stale_identity(StaleIdentityPolicy::Reject)
            .http_host(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            .http_port(8088)
            .cors_origin("https://jobs.example.com".into())
            .request_timeout(Duration::from_secs(5))
            .seed_path(PathBuf::from("/srv/seed.json"))
            .log_level("debug".into())
            .json_logs(true)
            .build()
            .unwrap();

        assert_eq!(config.http.port, 8088);
        assert_eq!(
            config.http.cors_origin.as_deref(),
            Some("https://jobs.example.com")
        );
        assert_eq!(config.http.request_timeout, Duration::from_secs(5));
        assert_eq!(config.auth.ttl, Some(Duration::from_secs(900)));
        assert_eq!(config.auth.stale_identity, StaleIdentityPolicy::Reject);
        assert_eq!(config.seed_path, Some(PathBuf::from("/srv/seed.json")));
        assert_eq!(config.telemetry.log_level, "debug");
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn test_http_config_default_cors_origin() {
        let config = HttpConfig::default();
        assert_eq!(config.cors_origin.as_deref(), Some(DEFAULT_CORS_ORIGIN));
    }
}
