use serde::{Deserialize, Serialize};

use crate::items::repo::Item;
use crate::recipes::repo::IngredientCategory;

/// Request body for a manual shopping-list entry.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub category: IngredientCategory,
}

/// One display section of the shopping list, as the list screen shows it:
/// a category header followed by that category's items.
#[derive(Debug, Serialize)]
pub struct CategorySection {
    pub category: IngredientCategory,
    pub label: &'static str,
    pub items: Vec<Item>,
}

/// Request body for editing an existing item in place.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: String,
    pub quantity: i64,
    pub is_bought: bool,
    #[serde(default)]
    pub category: IngredientCategory,
}
