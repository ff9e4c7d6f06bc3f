use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::recipes::defaults::default_recipes;
use crate::store::{KvStore, StoreError};

const STORE: &str = "recipes";

/// Grocery category an ingredient belongs to. Doubles as part of the
/// shopping-item identity during single-recipe aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngredientCategory {
    Dairy,
    MeatAndPoultry,
    FishAndSeafood,
    Vegetables,
    Fruits,
    GrainsAndPasta,
    SpicesAndSeasonings,
    OilsAndVinegars,
    Baking,
    CannedAndJarred,
    #[default]
    Other,
}

impl IngredientCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dairy => "Dairy",
            Self::MeatAndPoultry => "Meat & Poultry",
            Self::FishAndSeafood => "Fish & Seafood",
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::GrainsAndPasta => "Grains & Pasta",
            Self::SpicesAndSeasonings => "Spices & Seasonings",
            Self::OilsAndVinegars => "Oils & Vinegars",
            Self::Baking => "Baking",
            Self::CannedAndJarred => "Canned & Jarred",
            Self::Other => "Other",
        }
    }
}

/// Immutable recipe line: quantity may be fractional (1.5 cups), the
/// aggregator rounds it up to whole units when it becomes a shopping item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub category: IngredientCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub preparation_time: u32, // minutes
    #[serde(default)]
    pub image_uri: Option<String>,
}

fn collection_key(namespace: &str) -> String {
    format!("recipes_{namespace}")
}

/// Load the user's recipes. A missing, corrupt, or empty collection is
/// replaced by the starter set, which is persisted before returning so
/// subsequent reads see the same ids.
pub async fn load(kv: &dyn KvStore, namespace: &str) -> Result<Vec<Recipe>, StoreError> {
    let key = collection_key(namespace);
    let recipes = match kv.get(STORE, &key).await? {
        Some(raw) => match serde_json::from_str::<Vec<Recipe>>(&raw) {
            Ok(recipes) => recipes,
            Err(e) => {
                warn!(error = %e, namespace, "corrupt recipe collection, reseeding defaults");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    if recipes.is_empty() {
        let seeded = default_recipes();
        save(kv, namespace, &seeded).await?;
        return Ok(seeded);
    }
    Ok(recipes)
}

/// Replace the user's whole recipe collection in one write.
pub async fn save(kv: &dyn KvStore, namespace: &str, recipes: &[Recipe]) -> Result<(), StoreError> {
    let raw = serde_json::to_string(recipes).expect("recipes serialize");
    kv.put(STORE, &collection_key(namespace), raw).await
}
