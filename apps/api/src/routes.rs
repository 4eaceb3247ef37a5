//! Route table.
//!
//! ## Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          HTTP Surface                                   │
//! │                                                                         │
//! │  /api/categories            POST GET      (+ /:id GET PUT DELETE)       │
//! │  /api/categories/:id/subcategories  GET   (children by parent)          │
//! │  /api/categories/:id/items          GET                                 │
//! │  /api/subcategories         POST GET      (+ /:id GET PUT DELETE)       │
//! │  /api/subcategory/:id/items         GET   (singular, historical path)   │
//! │  /api/items                 POST GET      (+ /:id GET PUT DELETE)       │
//! │  /api/search?name=          GET           (exact item name match)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The GET `:id` segment also accepts an exact entity name (see
//! `LookupKey`). The singular `/api/subcategory/:id/items` path is
//! deliberate: existing clients use it, so it stays.

use axum::routing::get;
use axum::Router;

use crate::handlers::{category, item, subcategory};
use crate::AppState;

/// Builds the full application router over shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Categories
        .route(
            "/api/categories",
            get(category::list).post(category::create),
        )
        .route(
            "/api/categories/:id",
            get(category::get)
                .put(category::update)
                .delete(category::delete),
        )
        .route(
            "/api/categories/:id/subcategories",
            get(subcategory::list_by_category),
        )
        .route("/api/categories/:id/items", get(item::list_by_category))
        // Subcategories
        .route(
            "/api/subcategories",
            get(subcategory::list).post(subcategory::create),
        )
        .route(
            "/api/subcategories/:id",
            get(subcategory::get)
                .put(subcategory::update)
                .delete(subcategory::delete),
        )
        .route(
            "/api/subcategory/:id/items",
            get(item::list_by_subcategory),
        )
        // Items
        .route("/api/items", get(item::list).post(item::create))
        .route(
            "/api/items/:id",
            get(item::get).put(item::update).delete(item::delete),
        )
        .route("/api/search", get(item::search))
        .with_state(state)
}
