use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::{KvStore, StoreError};

const STORE: &str = "users";
const USERS_KEY: &str = "users";

/// Registered user. Email is the unique key and also the namespace every
/// per-user collection is stored under. The password is kept as entered;
/// credential hardening is explicitly out of scope for this app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Load all registered users. The collection is global, not namespaced.
pub async fn load(kv: &dyn KvStore) -> Result<Vec<User>, StoreError> {
    let raw = kv.get(STORE, USERS_KEY).await?;
    Ok(match raw {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "corrupt user collection, treating as empty");
            Vec::new()
        }),
        None => Vec::new(),
    })
}

/// Replace the whole user collection in one write.
pub async fn save(kv: &dyn KvStore, users: &[User]) -> Result<(), StoreError> {
    let raw = serde_json::to_string(users).expect("users serialize");
    kv.put(STORE, USERS_KEY, raw).await
}

/// Find a user by (already normalized) email.
pub async fn find_by_email(kv: &dyn KvStore, email: &str) -> Result<Option<User>, StoreError> {
    Ok(load(kv).await?.into_iter().find(|u| u.email == email))
}
