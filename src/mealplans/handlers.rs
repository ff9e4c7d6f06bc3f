use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::services::AuthUser,
    items::repo as items_repo,
    items::repo::Item,
    mealplans::dto::AssignSlotRequest,
    mealplans::repo::{self, MealPlan},
    mealplans::services::{assign_slot, normalize_week_start},
    recipes::repo as recipes_repo,
    shopping,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plans", get(list_meal_plans))
        .route("/meal-plans/slot", put(assign_meal_slot))
        .route(
            "/meal-plans/:week_start_date/shopping-list",
            post(add_week_to_shopping_list),
        )
}

#[instrument(skip(state))]
pub async fn list_meal_plans(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<Vec<MealPlan>>, (StatusCode, String)> {
    let plans = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    Ok(Json(plans))
}

/// Put a recipe snapshot into (or clear) one breakfast/lunch/dinner slot.
/// The week key is normalized to Sunday midnight UTC and the plan for
/// that week is found or created, so each week has exactly one plan.
#[instrument(skip(state, payload))]
pub async fn assign_meal_slot(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Json(payload): Json<AssignSlotRequest>,
) -> Result<Json<MealPlan>, (StatusCode, String)> {
    if !(1..=7).contains(&payload.day_of_week) {
        return Err((StatusCode::BAD_REQUEST, "day_of_week must be 1..=7".into()));
    }
    let week_start = normalize_week_start(payload.week_start_date)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    // Snapshot the recipe now; the plan keeps this copy even if the
    // recipe is edited later.
    let recipe = match payload.recipe_id {
        Some(id) => {
            let recipes = recipes_repo::load(state.kv.as_ref(), &email)
                .await
                .map_err(internal)?;
            let recipe = recipes
                .into_iter()
                .find(|r| r.id == id)
                .ok_or((StatusCode::BAD_REQUEST, "Unknown recipe".to_string()))?;
            Some(recipe)
        }
        None => None,
    };

    let plans = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    let plans = assign_slot(
        plans,
        week_start,
        payload.day_of_week,
        payload.meal_type,
        recipe,
    );
    repo::save(state.kv.as_ref(), &email, &plans)
        .await
        .map_err(internal)?;

    let plan = plans
        .into_iter()
        .find(|p| p.week_start_date == week_start)
        .expect("plan exists after assignment");
    info!(user = %email, week_start, day = payload.day_of_week, "meal slot updated");
    Ok(Json(plan))
}

/// Rebuild the shopping list from the given week's plan. No plan for the
/// week leaves the stored list untouched; otherwise the aggregated result
/// replaces it wholesale in a single write.
#[instrument(skip(state))]
pub async fn add_week_to_shopping_list(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(week_start_date): Path<i64>,
) -> Result<Json<Vec<Item>>, (StatusCode, String)> {
    let week_start = normalize_week_start(week_start_date)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let plans = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    let plan = plans.iter().find(|p| p.week_start_date == week_start);

    let existing = items_repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    if plan.is_none() {
        return Ok(Json(existing));
    }

    let items = shopping::add_week_plan_to_list(plan, existing);
    items_repo::save(state.kv.as_ref(), &email, &items)
        .await
        .map_err(internal)?;

    info!(user = %email, week_start, items = items.len(), "week plan added to shopping list");
    Ok(Json(items))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
