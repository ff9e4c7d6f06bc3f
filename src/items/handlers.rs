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
    items::dto::{AddItemRequest, CategorySection, UpdateItemRequest},
    items::repo::{self, Item},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(add_item).put(save_all_items))
        .route("/items/grouped", get(list_items_grouped))
        .route("/items/:id", put(update_item).delete(delete_item))
        .route("/items/:id/toggle", post(toggle_bought))
}

/// Sections in first-seen category order, items within a section in list
/// order, matching how the shopping list screen renders.
fn group_by_category(items: Vec<Item>) -> Vec<CategorySection> {
    let mut sections: Vec<CategorySection> = Vec::new();
    for item in items {
        match sections.iter_mut().find(|s| s.category == item.category) {
            Some(section) => section.items.push(item),
            None => sections.push(CategorySection {
                category: item.category,
                label: item.category.display_name(),
                items: vec![item],
            }),
        }
    }
    sections
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<Vec<Item>>, (StatusCode, String)> {
    let items = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn list_items_grouped(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<Vec<CategorySection>>, (StatusCode, String)> {
    let items = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    Ok(Json(group_by_category(items)))
}

#[instrument(skip(state, payload))]
pub async fn add_item(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Json(payload): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<Item>), (StatusCode, String)> {
    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Item name is required".into()));
    }
    if payload.quantity < 0 {
        return Err((StatusCode::BAD_REQUEST, "Quantity must be non-negative".into()));
    }

    let item = Item::new(payload.name, payload.quantity, payload.category);
    let mut items = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    items.push(item.clone());
    repo::save(state.kv.as_ref(), &email, &items)
        .await
        .map_err(internal)?;

    info!(user = %email, item = %item.id, "item added");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Replace the whole list in one write, the bulk-save path the
/// aggregation results and full edits go through.
#[instrument(skip(state, payload))]
pub async fn save_all_items(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Json(payload): Json<Vec<Item>>,
) -> Result<Json<Vec<Item>>, (StatusCode, String)> {
    repo::save(state.kv.as_ref(), &email, &payload)
        .await
        .map_err(internal)?;
    Ok(Json(payload))
}

#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<Item>, (StatusCode, String)> {
    let mut items = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    let Some(existing) = items.iter_mut().find(|i| i.id == id) else {
        return Err((StatusCode::NOT_FOUND, "Item not found".into()));
    };

    existing.name = payload.name;
    existing.quantity = payload.quantity;
    existing.is_bought = payload.is_bought;
    existing.category = payload.category;
    let updated = existing.clone();

    repo::save(state.kv.as_ref(), &email, &items)
        .await
        .map_err(internal)?;
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn toggle_bought(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Item>, (StatusCode, String)> {
    let mut items = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    let Some(item) = items.iter_mut().find(|i| i.id == id) else {
        return Err((StatusCode::NOT_FOUND, "Item not found".into()));
    };

    item.is_bought = !item.is_bought;
    let toggled = item.clone();

    repo::save(state.kv.as_ref(), &email, &items)
        .await
        .map_err(internal)?;
    Ok(Json(toggled))
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut items = repo::load(state.kv.as_ref(), &email)
        .await
        .map_err(internal)?;
    let before = items.len();
    items.retain(|i| i.id != id);
    if items.len() == before {
        return Err((StatusCode::NOT_FOUND, "Item not found".into()));
    }

    repo::save(state.kv.as_ref(), &email, &items)
        .await
        .map_err(internal)?;
    info!(user = %email, item = %id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
