//! Subcategory handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use menu_core::{LookupKey, NewSubcategory, Subcategory, SubcategoryUpdate};

use crate::error::ApiError;
use crate::handlers::DeleteResponse;
use crate::AppState;

/// POST /api/subcategories
///
/// Fails with 404 when the referenced parent category does not exist;
/// nothing is persisted in that case.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewSubcategory>,
) -> Result<(StatusCode, Json<Subcategory>), ApiError> {
    let subcategory = state.db.subcategories().create(payload).await?;
    info!(id = %subcategory.id, category = %subcategory.category, "Subcategory created");
    Ok((StatusCode::CREATED, Json(subcategory)))
}

/// GET /api/subcategories
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Subcategory>>, ApiError> {
    Ok(Json(state.db.subcategories().get_all().await?))
}

/// GET /api/categories/:id/subcategories
///
/// The parent id is not validated: an unknown id yields an empty list.
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<Subcategory>>, ApiError> {
    Ok(Json(
        state.db.subcategories().get_by_category(&category_id).await?,
    ))
}

/// GET /api/subcategories/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id_or_name): Path<String>,
) -> Result<Json<Subcategory>, ApiError> {
    let key = LookupKey::parse(&id_or_name);
    state
        .db
        .subcategories()
        .get_by_key(&key)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Subcategory"))
}

/// PUT /api/subcategories/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SubcategoryUpdate>,
) -> Result<Json<Subcategory>, ApiError> {
    let subcategory = state.db.subcategories().update(&id, payload).await?;
    info!(id = %subcategory.id, "Subcategory updated");
    Ok(Json(subcategory))
}

/// DELETE /api/subcategories/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.db.subcategories().delete(&id).await?;
    info!(id = %id, "Subcategory deleted");
    Ok(Json(DeleteResponse::for_entity("Subcategory")))
}
