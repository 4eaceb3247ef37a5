//! HTTP handlers, one module per entity.
//!
//! Handlers share a thin shape: extract, call the repository, map the
//! result. Creates return 201 with the stored entity; deletes return a
//! `{"message": ...}` confirmation; reads through `LookupKey` return 404
//! on a miss.

pub mod category;
pub mod item;
pub mod subcategory;

use serde::Serialize;

/// Body returned by the delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn for_entity(entity: &str) -> Self {
        DeleteResponse {
            message: format!("{entity} deleted successfully"),
        }
    }
}
