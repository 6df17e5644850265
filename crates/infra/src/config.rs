//! Gateway configuration loaded from the process environment.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::info;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const MAX_CONNECTIONS: &str = "STOREFRONT_DB_MAX_CONNECTIONS";
pub const SCHEMA: &str = "STOREFRONT_DB_SCHEMA";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SCHEMA: &str = "public";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {message}")]
    Invalid { name: &'static str, message: String },

    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Schema whose `information_schema.columns` are introspected.
    pub schema: String,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url = get(DATABASE_URL).ok_or(ConfigError::Missing(DATABASE_URL))?;

        let max_connections = match get(MAX_CONNECTIONS) {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        name: MAX_CONNECTIONS,
                        message: "must be greater than zero".to_string(),
                    });
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: MAX_CONNECTIONS,
                        message: e.to_string(),
                    });
                }
            },
        };

        let schema = get(SCHEMA).unwrap_or_else(|| DEFAULT_SCHEMA.to_string());

        Ok(Self {
            database_url,
            max_connections,
            schema,
        })
    }

    pub async fn connect(&self) -> Result<PgPool, ConfigError> {
        info!(
            max_connections = self.max_connections,
            schema = %self.schema,
            "connecting to catalog database"
        );
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.database_url)
            .await?;
        Ok(pool)
    }
}
