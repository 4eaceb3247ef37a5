//! # Repository Module
//!
//! Entity stores for the menu backend.
//!
//! ## The Three Stores
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Stores and Parent-Link Maintenance                      │
//! │                                                                         │
//! │  CategoryRepository      SubcategoryRepository    ItemRepository       │
//! │  ├── create              ├── create ──────┐       ├── create ───┐      │
//! │  ├── get_all             ├── get_all      │       ├── get_all   │      │
//! │  ├── get_by_key          ├── get_by_cat.  │       ├── get_by_*  │      │
//! │  ├── update              ├── update       │       ├── search    │      │
//! │  ├── delete              ├── delete       │       ├── update    │      │
//! │  └── link_* (internal)◄──┴────────────────┴───────┴── delete    │      │
//! │         ▲                                                       │      │
//! │         └───────────────────────────────────────────────────────┘      │
//! │                                                                         │
//! │  A child create runs as ONE store transaction:                          │
//! │    1. parent existence check(s)   → NotFound rolls back                 │
//! │    2. child insert                                                      │
//! │    3. parent id-list append(s)    (link_* helpers)                      │
//! │    4. commit                                                            │
//! │                                                                         │
//! │  Deletes and updates never touch the id lists: dangling references      │
//! │  are an accepted state of this schema.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`category::CategoryRepository`] - Category CRUD and dual-key lookup
//! - [`subcategory::SubcategoryRepository`] - Subcategory CRUD, parent-linked create
//! - [`item::ItemRepository`] - Item CRUD, name search, two-parent create

pub mod category;
pub mod item;
pub mod subcategory;

use crate::error::DbResult;

/// Decodes a JSON id-list column ("[\"id1\",\"id2\"]") into a Vec.
pub(crate) fn parse_id_list(raw: &str) -> DbResult<Vec<String>> {
    Ok(serde_json::from_str(raw)?)
}

/// Encodes an id list for storage in a JSON column.
pub(crate) fn encode_id_list(ids: &[String]) -> DbResult<String> {
    Ok(serde_json::to_string(ids)?)
}

/// Decodes a stored tax_type column value.
pub(crate) fn parse_tax_type(raw: &str) -> DbResult<menu_core::TaxType> {
    menu_core::TaxType::parse(raw).ok_or_else(|| {
        crate::error::DbError::Serialization(format!("unknown tax type: {raw}"))
    })
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::pool::{Database, DbConfig};

    /// Fresh isolated in-memory database with migrations applied.
    pub(crate) async fn test_db() -> Database {
        Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database")
    }
}
