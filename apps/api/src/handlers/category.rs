//! Category handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use menu_core::{Category, CategoryUpdate, LookupKey, NewCategory};

use crate::error::ApiError;
use crate::handlers::DeleteResponse;
use crate::AppState;

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.db.categories().create(payload).await?;
    info!(id = %category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.db.categories().get_all().await?))
}

/// GET /api/categories/:id
///
/// The path segment may be an id or an exact name.
pub async fn get(
    State(state): State<AppState>,
    Path(id_or_name): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let key = LookupKey::parse(&id_or_name);
    state
        .db
        .categories()
        .get_by_key(&key)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category"))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<Category>, ApiError> {
    let category = state.db.categories().update(&id, payload).await?;
    info!(id = %category.id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/categories/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.db.categories().delete(&id).await?;
    info!(id = %id, "Category deleted");
    Ok(Json(DeleteResponse::for_entity("Category")))
}
