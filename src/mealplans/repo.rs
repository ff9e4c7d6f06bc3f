use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::recipes::repo::Recipe;
use crate::store::{KvStore, StoreError};

const STORE: &str = "meal_plans";

/// Breakfast/lunch/dinner slot for the slot-assignment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

/// One day's slots. A filled slot holds a full recipe snapshot taken at
/// assignment time; later recipe edits do not reach back into the plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub breakfast: Option<Recipe>,
    #[serde(default)]
    pub lunch: Option<Recipe>,
    #[serde(default)]
    pub dinner: Option<Recipe>,
}

impl DayPlan {
    pub fn slot_mut(&mut self, meal_type: MealType) -> &mut Option<Recipe> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }
}

/// A week of day plans. `week_start_date` is epoch millis of the week's
/// Sunday at 00:00:00.000 UTC and is unique across the collection.
/// Day keys run 1..=7 with 1 = Sunday; BTreeMap keeps them in ascending
/// day order, which the week aggregation relies on for determinism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: Uuid,
    pub week_start_date: i64,
    pub daily_plans: BTreeMap<u8, DayPlan>,
}

fn collection_key(namespace: &str) -> String {
    format!("meal_plans_{namespace}")
}

/// Load the user's meal plans. Missing or corrupt data degrades to an
/// empty collection rather than an error.
pub async fn load(kv: &dyn KvStore, namespace: &str) -> Result<Vec<MealPlan>, StoreError> {
    let raw = kv.get(STORE, &collection_key(namespace)).await?;
    Ok(match raw {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, namespace, "corrupt meal plan collection, treating as empty");
            Vec::new()
        }),
        None => Vec::new(),
    })
}

/// Replace the user's whole meal plan collection in one write.
pub async fn save(kv: &dyn KvStore, namespace: &str, plans: &[MealPlan]) -> Result<(), StoreError> {
    let raw = serde_json::to_string(plans).expect("meal plans serialize");
    kv.put(STORE, &collection_key(namespace), raw).await
}
