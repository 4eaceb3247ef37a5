//! # Menu API
//!
//! REST API server for menu management.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Menu API Server                                │
//! │                                                                         │
//! │  Client ───► HTTP (3000) ───► Handlers ───► Repositories ───► SQLite   │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │           /api/category     /api/subcategory     /api/item             │
//! │           /api/search?name=...                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers translate between the JSON wire contract and the repository
//! layer. All persistence and referential-integrity logic lives in
//! `menu-db`; handlers only map lookup keys, payloads, and errors.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use menu_db::Database;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}
