//! Daemon configuration: `biztime.toml` layered under `BIZTIME_*` variables.
//!
//! The file is optional unless `BIZTIME_CONFIG` points at one explicitly.
//! Every key has a default, and environment variables win over the file.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File read when `BIZTIME_CONFIG` is unset.
pub const DEFAULT_PATH: &str = "biztime.toml";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite:biztime.db?mode=rwc";
const DEFAULT_LOG_FILTER: &str = "biztimed=info,biztime=info,tower_http=debug";

/// Top-level configuration.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Where the HTTP listener binds.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

/// Store holding companies, invoices and industries.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite::memory:`.
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Resolve the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::resolve`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Read the file selected by `BIZTIME_CONFIG` (or [`DEFAULT_PATH`]),
    /// apply overrides looked up through `var`, then validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an explicitly selected file is missing,
    /// a file cannot be read or parsed, an override does not parse, or the
    /// result fails validation.
    pub fn resolve(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match var("BIZTIME_CONFIG") {
            Some(path) => Self::read(Path::new(&path))?,
            None => Self::read_optional(Path::new(DEFAULT_PATH))?,
        };
        config.override_from(var)?;
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn read_optional(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::read(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    fn override_from(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(value) = var("BIZTIME_BIND") {
            let addr: SocketAddr = parse_env("BIZTIME_BIND", value)?;
            self.server.host = addr.ip();
            self.server.port = addr.port();
        }
        if let Some(value) = var("BIZTIME_HOST") {
            self.server.host = parse_env("BIZTIME_HOST", value)?;
        }
        if let Some(value) = var("BIZTIME_PORT") {
            self.server.port = parse_env("BIZTIME_PORT", value)?;
        }
        if let Some(url) = var("BIZTIME_DATABASE_URL") {
            self.database.url = url;
        }
        // RUST_LOG is the more specific knob, so it is applied last.
        if let Some(filter) = var("BIZTIME_LOG").into_iter().chain(var("RUST_LOG")).last() {
            self.logging.filter = filter;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero"));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Validation("database.url must not be empty"));
        }
        Ok(())
    }

    /// Socket address the listener binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidOverride { key, value })
}

/// Reasons the daemon refuses to start with the given configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{key} has an unusable value {value:?}")]
    InvalidOverride { key: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Validation(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn with_overrides(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let mut config = Config::default();
        config.override_from(vars(pairs))?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn should_listen_on_all_interfaces_port_3000_by_default() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_url(), "sqlite:biztime.db?mode=rwc");
    }

    #[test]
    fn should_fill_missing_sections_from_defaults() {
        let config: Config = toml::from_str("[database]\nurl = 'sqlite::memory:'").unwrap();
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn should_parse_ipv6_host_from_file() {
        let config: Config = toml::from_str("[server]\nhost = '::1'\nport = 8080").unwrap();
        assert_eq!(config.bind_addr(), "[::1]:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn should_reject_unknown_keys_in_file() {
        let result: Result<Config, _> = toml::from_str("[server]\nhots = '127.0.0.1'");
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_host_that_is_not_an_ip() {
        let result: Result<Config, _> = toml::from_str("[server]\nhost = 'localhost'");
        assert!(result.is_err());
    }

    #[test]
    fn should_use_defaults_when_selected_file_is_absent() {
        let config = Config::read_optional(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn should_fail_when_explicit_config_file_is_missing() {
        let result = Config::resolve(vars(&[("BIZTIME_CONFIG", "does-not-exist.toml")]));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn should_let_host_and_port_refine_bind() {
        let config = with_overrides(&[
            ("BIZTIME_BIND", "127.0.0.1:8080"),
            ("BIZTIME_PORT", "9090"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn should_report_unparseable_port_override() {
        let result = with_overrides(&[("BIZTIME_PORT", "http")]);
        match result {
            Err(ConfigError::InvalidOverride { key, value }) => {
                assert_eq!(key, "BIZTIME_PORT");
                assert_eq!(value, "http");
            }
            other => panic!("expected invalid override, got {other:?}"),
        }
    }

    #[test]
    fn should_report_bind_without_port() {
        let result = with_overrides(&[("BIZTIME_BIND", "127.0.0.1")]);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride { key: "BIZTIME_BIND", .. })
        ));
    }

    #[test]
    fn should_prefer_rust_log_over_biztime_log() {
        let config = with_overrides(&[("BIZTIME_LOG", "warn"), ("RUST_LOG", "trace")]).unwrap();
        assert_eq!(config.logging.filter, "trace");

        let config = with_overrides(&[("BIZTIME_LOG", "warn")]).unwrap();
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_point_at_in_memory_database_from_env() {
        let config = with_overrides(&[("BIZTIME_DATABASE_URL", "sqlite::memory:")]).unwrap();
        assert_eq!(config.database_url(), "sqlite::memory:");
    }

    #[test]
    fn should_refuse_port_zero() {
        let result = with_overrides(&[("BIZTIME_PORT", "0")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_refuse_blank_database_url() {
        let result = with_overrides(&[("BIZTIME_DATABASE_URL", "  ")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
