use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::books_repository::PostgresBooksRepositoryConfig;

const ENV_PREFIX: &str = "BOOKSTORE";
const CONFIG_FILE: &str = "bookstore";

/// Settings of the bookstore server.
///
/// Layered from built-in defaults, an optional `bookstore.toml` next to the binary and
/// `BOOKSTORE_*` environment variables, e.g. `BOOKSTORE_USE_IN_MEMORY_DB=true`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppSettings {
    pub use_in_memory_db: bool,
    pub db_host: String,
    pub db_username: String,
    pub db_password: String,
    pub db_name: String,
    pub bind_address: String,
    pub port: u16,
    pub jaeger_enabled: bool,
}

impl AppSettings {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        builder
            .set_default("use_in_memory_db", false)?
            .set_default("db_host", "127.0.0.1")?
            .set_default("db_username", "postgres")?
            .set_default("db_password", "postgres")?
            .set_default("db_name", "postgres")?
            .set_default("bind_address", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("jaeger_enabled", true)?
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn postgres_config(&self) -> PostgresBooksRepositoryConfig {
        PostgresBooksRepositoryConfig {
            hostname: self.db_host.clone(),
            username: self.db_username.clone(),
            password: self.db_password.clone(),
            database: self.db_name.clone(),
        }
    }
}
