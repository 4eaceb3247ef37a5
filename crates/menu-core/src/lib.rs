//! # menu-core: Pure Domain Logic for the Menu Backend
//!
//! This crate holds the domain model of the menu-management system: three
//! related entities exposed over HTTP and persisted by `menu-db`.
//!
//! ## Entity Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Menu Entity Graph                                 │
//! │                                                                         │
//! │  ┌──────────────┐ subCategories ┌──────────────┐   items  ┌──────────┐ │
//! │  │   Category   │──────────────►│ Subcategory  │─────────►│   Item   │ │
//! │  │              │               │              │          │          │ │
//! │  │ id           │   items       │ id           │          │ id       │ │
//! │  │ name         │──────────────────────────────────────── │ name     │ │
//! │  │ tax (cond.)  │               │ category ────┼──┐       │ category │ │
//! │  └──────────────┘               └──────────────┘  │       │ subcat.  │ │
//! │         ▲                                         │       └──────────┘ │
//! │         └─────────────────────────────────────────┘                    │
//! │                                                                         │
//! │  Parent→child lists (subCategories, items) are denormalized id          │
//! │  caches, not the source of truth for existence. Child→parent refs       │
//! │  (category, subcategory) are required at creation time only; deletes    │
//! │  do not cascade, so either side can dangle afterwards.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`types`] - Entity structs, payload structs, [`LookupKey`]
//! - [`validation`] - Field validation rules
//! - [`error`] - [`ValidationError`]

pub mod error;
pub mod types;
pub mod validation;

// Re-exports for convenient access
pub use error::{ValidationError, ValidationResult};
pub use types::{
    Category, CategoryUpdate, Item, ItemUpdate, LookupKey, NewCategory, NewItem, NewSubcategory,
    Subcategory, SubcategoryUpdate, TaxType,
};

/// Maximum length for entity names.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for entity descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 2000;
