use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::recipes::repo::IngredientCategory;
use crate::store::{KvStore, StoreError};

const STORE: &str = "items";

/// Shopping-list entry. Quantity is a whole unit count (the aggregator
/// ceiling-rounds fractional ingredient quantities before items exist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub is_bought: bool,
    #[serde(default)]
    pub category: IngredientCategory,
}

impl Item {
    pub fn new(name: String, quantity: i64, category: IngredientCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            quantity,
            is_bought: false,
            category,
        }
    }
}

fn collection_key(namespace: &str) -> String {
    format!("items_{namespace}")
}

/// Load the user's shopping list. Missing or corrupt data degrades to an
/// empty list rather than an error.
pub async fn load(kv: &dyn KvStore, namespace: &str) -> Result<Vec<Item>, StoreError> {
    let raw = kv.get(STORE, &collection_key(namespace)).await?;
    Ok(match raw {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, namespace, "corrupt item collection, treating as empty");
            Vec::new()
        }),
        None => Vec::new(),
    })
}

/// Replace the user's whole shopping list in one write.
pub async fn save(kv: &dyn KvStore, namespace: &str, items: &[Item]) -> Result<(), StoreError> {
    let raw = serde_json::to_string(items).expect("items serialize");
    kv.put(STORE, &collection_key(namespace), raw).await
}
