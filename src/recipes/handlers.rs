use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::services::AuthUser,
    items::repo as items_repo,
    items::repo::Item,
    recipes::dto::RecipeRequest,
    recipes::repo::{self, Recipe},
    shopping,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/:id", put(update_recipe).delete(delete_recipe))
        .route("/recipes/:id/shopping-list", post(add_to_shopping_list))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<Vec<Recipe>>, (StatusCode, String)> {
    let recipes = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    Ok(Json(recipes))
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Json(payload): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), (StatusCode, String)> {
    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Recipe name is required".into()));
    }

    let recipe = Recipe {
        id: Uuid::new_v4(),
        name: payload.name,
        ingredients: payload.ingredients,
        instructions: payload.instructions,
        preparation_time: payload.preparation_time,
        image_uri: payload.image_uri,
    };

    let mut recipes = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    recipes.push(recipe.clone());
    repo::save(state.kv.as_ref(), &email, &recipes)
        .await
        .map_err(internal)?;

    info!(user = %email, recipe = %recipe.id, "recipe created");
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[instrument(skip(state, payload))]
pub async fn update_recipe(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecipeRequest>,
) -> Result<Json<Recipe>, (StatusCode, String)> {
    let mut recipes = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    let Some(existing) = recipes.iter_mut().find(|r| r.id == id) else {
        return Err((StatusCode::NOT_FOUND, "Recipe not found".into()));
    };

    *existing = Recipe {
        id,
        name: payload.name,
        ingredients: payload.ingredients,
        instructions: payload.instructions,
        preparation_time: payload.preparation_time,
        image_uri: payload.image_uri,
    };
    let updated = existing.clone();

    repo::save(state.kv.as_ref(), &email, &recipes)
        .await
        .map_err(internal)?;
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut recipes = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    let before = recipes.len();
    recipes.retain(|r| r.id != id);
    if recipes.len() == before {
        return Err((StatusCode::NOT_FOUND, "Recipe not found".into()));
    }

    repo::save(state.kv.as_ref(), &email, &recipes)
        .await
        .map_err(internal)?;
    info!(user = %email, recipe = %id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Merge one recipe's ingredients into the user's shopping list:
/// load the current list, aggregate, persist the replacement in a single
/// write, and return the new list.
#[instrument(skip(state))]
pub async fn add_to_shopping_list(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Item>>, (StatusCode, String)> {
    let recipes = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    let Some(recipe) = recipes.into_iter().find(|r| r.id == id) else {
        return Err((StatusCode::NOT_FOUND, "Recipe not found".into()));
    };

    let existing = items_repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    let items = shopping::add_recipe_to_list(&recipe, existing);
    items_repo::save(state.kv.as_ref(), &email, &items)
        .await
        .map_err(internal)?;

    info!(user = %email, recipe = %recipe.name, items = items.len(), "recipe added to shopping list");
    Ok(Json(items))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::repo::{Ingredient, IngredientCategory};

    fn request(name: &str, ingredients: Vec<Ingredient>) -> RecipeRequest {
        RecipeRequest {
            name: name.into(),
            ingredients,
            instructions: vec![],
            preparation_time: 10,
            image_uri: None,
        }
    }

    #[tokio::test]
    async fn create_update_delete_cycle() {
        let state = AppState::fake();
        let auth = || AuthUser("a@b.c".into());

        let (status, created) = create_recipe(
            State(state.clone()),
            auth(),
            Json(request("Toast", vec![])),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let updated = update_recipe(
            State(state.clone()),
            auth(),
            Path(created.0.id),
            Json(request("French Toast", vec![])),
        )
        .await
        .unwrap();
        assert_eq!(updated.0.name, "French Toast");
        assert_eq!(updated.0.id, created.0.id);

        let status = delete_recipe(State(state.clone()), auth(), Path(created.0.id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let recipes = list_recipes(State(state), auth()).await.unwrap();
        assert!(recipes.0.iter().all(|r| r.id != created.0.id));
    }

    #[tokio::test]
    async fn update_unknown_recipe_is_not_found() {
        let state = AppState::fake();
        let (status, _) = update_recipe(
            State(state),
            AuthUser("a@b.c".into()),
            Path(Uuid::new_v4()),
            Json(request("Ghost", vec![])),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn add_to_shopping_list_merges_and_persists() {
        let state = AppState::fake();
        let auth = || AuthUser("a@b.c".into());

        let (_, created) = create_recipe(
            State(state.clone()),
            auth(),
            Json(request(
                "Pasta",
                vec![Ingredient {
                    name: "Tomato".into(),
                    quantity: 2.5,
                    unit: "kg".into(),
                    category: IngredientCategory::Vegetables,
                }],
            )),
        )
        .await
        .unwrap();

        let items = add_to_shopping_list(State(state.clone()), auth(), Path(created.0.id))
            .await
            .unwrap();
        assert_eq!(items.0.len(), 1);
        assert_eq!(items.0[0].name, "Tomato (kg)");
        assert_eq!(items.0[0].quantity, 3);

        // Adding the same recipe again tops up the persisted list.
        let items = add_to_shopping_list(State(state.clone()), auth(), Path(created.0.id))
            .await
            .unwrap();
        assert_eq!(items.0.len(), 1);
        assert_eq!(items.0[0].quantity, 6);

        let persisted = items_repo::load(state.kv.as_ref(), "a@b.c").await.unwrap();
        assert_eq!(persisted, items.0);
    }
}
