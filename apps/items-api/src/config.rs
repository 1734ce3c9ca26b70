//! Configuration for Items API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use strum::{Display, EnumString};

pub use core_config::Environment;

/// Which item store backs the API
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

/// Storage settings resolved from `ITEMS_STORAGE`
#[derive(Clone, Debug)]
pub enum StorageConfig {
    Postgres(PostgresConfig),
    Memory,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub storage: StorageConfig,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
    /// Comma-separated origins; no CORS layer when unset
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;

        let backend: StorageBackend = match std::env::var("ITEMS_STORAGE") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::ParseError {
                key: "ITEMS_STORAGE".to_string(),
                details: format!("expected 'postgres' or 'memory', got '{}'", raw),
            })?,
            Err(_) => StorageBackend::default(),
        };

        let storage = match backend {
            StorageBackend::Postgres => StorageConfig::Postgres(PostgresConfig::from_env()?),
            StorageBackend::Memory => StorageConfig::Memory,
        };

        let cors_allowed_origin = std::env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .filter(|origins| !origins.trim().is_empty());

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            storage,
            run_migrations: env_parse("RUN_MIGRATIONS", true)?,
            cors_allowed_origin,
        })
    }

    pub fn backend(&self) -> StorageBackend {
        match self.storage {
            StorageConfig::Postgres(_) => StorageBackend::Postgres,
            StorageConfig::Memory => StorageBackend::Memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_needs_no_database_url() {
        temp_env::with_vars(
            [
                ("ITEMS_STORAGE", Some("memory")),
                ("DATABASE_URL", None),
                ("CORS_ALLOWED_ORIGIN", None),
                ("RUN_MIGRATIONS", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.backend(), StorageBackend::Memory);
                assert!(config.run_migrations);
                assert!(config.cors_allowed_origin.is_none());
                assert_eq!(config.app.name, "items_api");
            },
        );
    }

    #[test]
    fn test_postgres_backend_is_default() {
        temp_env::with_vars(
            [
                ("ITEMS_STORAGE", None),
                ("DATABASE_URL", Some("postgresql://localhost/items")),
                ("RUN_MIGRATIONS", Some("false")),
                ("CORS_ALLOWED_ORIGIN", Some("http://localhost:3000")),
            ],
            || {
                let config = Config::from_env().unwrap();
                match &config.storage {
                    StorageConfig::Postgres(pg) => {
                        assert_eq!(pg.url, "postgresql://localhost/items")
                    }
                    StorageConfig::Memory => panic!("expected postgres storage"),
                }
                assert!(!config.run_migrations);
                assert_eq!(
                    config.cors_allowed_origin.as_deref(),
                    Some("http://localhost:3000")
                );
            },
        );
    }

    #[test]
    fn test_postgres_backend_requires_database_url() {
        temp_env::with_vars(
            [("ITEMS_STORAGE", Some("postgres")), ("DATABASE_URL", None)],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("DATABASE_URL"));
            },
        );
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        temp_env::with_var("ITEMS_STORAGE", Some("sqlite"), || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("ITEMS_STORAGE"));
        });
    }

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!(
            "Memory".parse::<StorageBackend>().unwrap(),
            StorageBackend::Memory
        );
        assert_eq!(StorageBackend::Postgres.to_string(), "postgres");
    }
}
