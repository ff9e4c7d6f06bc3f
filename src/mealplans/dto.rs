use serde::Deserialize;
use uuid::Uuid;

use crate::mealplans::repo::MealType;

/// Request body for assigning (or clearing, with `recipe_id: null`) one
/// meal slot in a week's plan.
#[derive(Debug, Deserialize)]
pub struct AssignSlotRequest {
    pub week_start_date: i64, // epoch millis, normalized server-side
    pub day_of_week: u8,      // 1..=7, 1 = Sunday
    pub meal_type: MealType,
    #[serde(default)]
    pub recipe_id: Option<Uuid>,
}
