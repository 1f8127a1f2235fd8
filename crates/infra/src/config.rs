//! Configuration loading and representation.
//!
//! Sources, lowest to highest precedence:
//! 1. built-in defaults
//! 2. `storeroom.toml` (or the file named by `STOREROOM_CONFIG`), if present
//! 3. `STOREROOM_*` environment variables, nested on `__`
//!    (e.g. `STOREROOM_SERVER__PORT=9000`)
//! 4. `DATABASE_URL`, as a plain override for `database.url`

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "storeroom.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] figment::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Store selection: Postgres when `url` is set, in-memory otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Default filter directive; `RUST_LOG` overrides it.
    pub log_level: String,
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: true,
        }
    }
}

/// Cross-origin policy. An empty list admits any origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from the file named by `STOREROOM_CONFIG` (falling
    /// back to `storeroom.toml`) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("STOREROOM_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load configuration using `path` as the TOML layer. A missing file is
    /// not an error.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Ok(Self::figment(path).extract()?)
    }

    pub fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("STOREROOM_").split("__"))
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL"])
                    .map(|_| "database.url".into()),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_file() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.json);
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [server]
                port = 9001

                [telemetry]
                json = false

                [cors]
                allowed_origins = ["http://localhost:3000"]
                "#,
            )?;

            let config = AppConfig::figment("custom.toml").extract::<AppConfig>()?;
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 9001);
            assert!(!config.telemetry.json);
            assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
            Ok(())
        });
    }

    #[test]
    fn prefixed_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("storeroom.toml", "[server]\nport = 9001\n")?;
            jail.set_env("STOREROOM_SERVER__PORT", "9002");
            jail.set_env("STOREROOM_TELEMETRY__LOG_LEVEL", "debug");

            let config = AppConfig::figment("storeroom.toml").extract::<AppConfig>()?;
            assert_eq!(config.server.port, 9002);
            assert_eq!(config.telemetry.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn database_url_env_wins() {
        Jail::expect_with(|jail| {
            jail.set_env("STOREROOM_DATABASE__URL", "postgres://from-prefixed/db");
            jail.set_env("DATABASE_URL", "postgres://from-plain/db");

            let config = AppConfig::figment("missing.toml").extract::<AppConfig>()?;
            assert_eq!(config.database.url.as_deref(), Some("postgres://from-plain/db"));
            Ok(())
        });
    }

    #[test]
    fn malformed_value_is_a_load_error() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.toml", "[server]\nport = \"not-a-port\"\n")?;
            let err = AppConfig::load_from("bad.toml").unwrap_err();
            assert!(matches!(err, ConfigError::Load(_)));
            Ok(())
        });
    }
}
