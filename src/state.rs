use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::SqlitePoolOptions;

use crate::config::{AppConfig, JwtConfig};
use crate::store::{KvStore, MemoryKv, SqliteKv};

#[derive(Clone)]
pub struct AppState {
    pub kv: Arc<dyn KvStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("run migrations")?;

        let kv = Arc::new(SqliteKv::new(pool)) as Arc<dyn KvStore>;
        Ok(Self { kv, config })
    }

    /// In-memory state for unit tests: no database, fixed JWT config.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
        });
        Self {
            kv: Arc::new(MemoryKv::default()),
            config,
        }
    }
}
