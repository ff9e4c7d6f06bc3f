use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Local key-value storage. Each (store, key) pair holds one whole JSON
/// collection; `put` replaces the full value in a single upsert, so a
/// collection save is atomic (no partial writes).
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, store: &str, key: &str) -> Result<Option<String>, StoreError>;
    async fn put(&self, store: &str, key: &str, value: String) -> Result<(), StoreError>;
    async fn remove(&self, store: &str, key: &str) -> Result<(), StoreError>;
}

/// Sqlite-backed store, the production implementation.
pub struct SqliteKv {
    pool: SqlitePool,
}

impl SqliteKv {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStore for SqliteKv {
    async fn get(&self, store: &str, key: &str) -> Result<Option<String>, StoreError> {
        let row: Option<(String,)> =
            sqlx::query_as(r#"SELECT value FROM kv WHERE store = ? AND key = ?"#)
                .bind(store)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn put(&self, store: &str, key: &str, value: String) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO kv (store, key, value)
            VALUES (?, ?, ?)
            ON CONFLICT (store, key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(store)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, store: &str, key: &str) -> Result<(), StoreError> {
        sqlx::query(r#"DELETE FROM kv WHERE store = ? AND key = ?"#)
            .bind(store)
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryKv {
    inner: Mutex<HashMap<(String, String), String>>,
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, store: &str, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.inner.lock().expect("kv lock poisoned");
        Ok(map.get(&(store.to_string(), key.to_string())).cloned())
    }

    async fn put(&self, store: &str, key: &str, value: String) -> Result<(), StoreError> {
        let mut map = self.inner.lock().expect("kv lock poisoned");
        map.insert((store.to_string(), key.to_string()), value);
        Ok(())
    }

    async fn remove(&self, store: &str, key: &str) -> Result<(), StoreError> {
        let mut map = self.inner.lock().expect("kv lock poisoned");
        map.remove(&(store.to_string(), key.to_string()));
        Ok(())
    }
}
