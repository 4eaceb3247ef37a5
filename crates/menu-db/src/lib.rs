//! # menu-db: Database Layer for the Menu Backend
//!
//! This crate provides storage for the three menu entities. It uses SQLite
//! as the delegated document store, reached through sqlx.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Menu Backend Data Flow                           │
//! │                                                                         │
//! │  HTTP handler (POST /api/items)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     menu-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (category.rs  │    │  (embedded)  │  │   │
//! │  │   │               │    │  subcategory  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  item.rs)     │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (category, subcategory, item)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use menu_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("data/menu.db")).await?;
//! let categories = db.categories().get_all().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::item::ItemRepository;
pub use repository::subcategory::SubcategoryRepository;
