//! Item handlers, including the name search endpoint.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use menu_core::{Item, ItemUpdate, LookupKey, NewItem};

use crate::error::ApiError;
use crate::handlers::DeleteResponse;
use crate::AppState;

/// POST /api/items
///
/// Fails with 404 naming whichever parent is missing (category checked
/// first); nothing is persisted in that case.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewItem>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = state.db.items().create(payload).await?;
    info!(id = %item.id, name = %item.name, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/items
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(state.db.items().get_all().await?))
}

/// GET /api/categories/:id/items
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(state.db.items().get_by_category(&category_id).await?))
}

/// GET /api/subcategory/:id/items
pub async fn list_by_subcategory(
    State(state): State<AppState>,
    Path(subcategory_id): Path<String>,
) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(
        state.db.items().get_by_subcategory(&subcategory_id).await?,
    ))
}

/// GET /api/items/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id_or_name): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let key = LookupKey::parse(&id_or_name);
    state
        .db
        .items()
        .get_by_key(&key)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Item"))
}

/// Query parameters for the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// GET /api/search?name=
///
/// Exact name match, first hit. A missing `name` parameter behaves like
/// a miss.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Item>, ApiError> {
    let name = params.name.ok_or_else(|| ApiError::not_found("Item"))?;
    state
        .db
        .items()
        .get_by_name(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Item"))
}

/// PUT /api/items/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ItemUpdate>,
) -> Result<Json<Item>, ApiError> {
    let item = state.db.items().update(&id, payload).await?;
    info!(id = %item.id, "Item updated");
    Ok(Json(item))
}

/// DELETE /api/items/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.db.items().delete(&id).await?;
    info!(id = %id, "Item deleted");
    Ok(Json(DeleteResponse::for_entity("Item")))
}
