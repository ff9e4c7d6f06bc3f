use serde::Deserialize;

use crate::recipes::repo::Ingredient;

/// Request body for creating or replacing a recipe.
#[derive(Debug, Deserialize)]
pub struct RecipeRequest {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub preparation_time: u32,
    #[serde(default)]
    pub image_uri: Option<String>,
}
