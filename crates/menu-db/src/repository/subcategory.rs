//! # Subcategory Repository
//!
//! Database operations for subcategories.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Subcategory Create (one transaction)                   │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    1. fetch parent Category ── missing? → NotFound("Category"),         │
//! │    2. INSERT subcategory                 ROLLBACK (nothing persisted)   │
//! │    3. append new id to parent's subCategories list                      │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  The child record and the parent link land together or not at all:      │
//! │  the orphan-in-list states of a sequential two-write scheme cannot      │
//! │  occur.                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::category;
use crate::repository::{encode_id_list, parse_id_list, parse_tax_type};
use menu_core::{validation, LookupKey, NewSubcategory, Subcategory, SubcategoryUpdate, MAX_NAME_LEN};

/// Raw row as stored; the items list and tax_type are decoded in `TryFrom`.
#[derive(Debug, sqlx::FromRow)]
struct SubcategoryRow {
    id: String,
    name: String,
    image: String,
    description: String,
    tax_applicability: bool,
    tax: f64,
    tax_type: String,
    items: String,
    category: String,
}

impl TryFrom<SubcategoryRow> for Subcategory {
    type Error = DbError;

    fn try_from(row: SubcategoryRow) -> DbResult<Subcategory> {
        Ok(Subcategory {
            id: row.id,
            name: row.name,
            image: row.image,
            description: row.description,
            tax_applicability: row.tax_applicability,
            tax: row.tax,
            tax_type: parse_tax_type(&row.tax_type)?,
            items: parse_id_list(&row.items)?,
            category: row.category,
        })
    }
}

/// Repository for subcategory database operations.
#[derive(Debug, Clone)]
pub struct SubcategoryRepository {
    pool: SqlitePool,
}

impl SubcategoryRepository {
    /// Creates a new SubcategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SubcategoryRepository { pool }
    }

    /// Creates a subcategory under an existing category.
    ///
    /// ## Errors
    /// * `DbError::Validation` - missing/blank required fields
    /// * `DbError::NotFound("Category")` - the referenced parent does not
    ///   exist; nothing is persisted
    pub async fn create(&self, payload: NewSubcategory) -> DbResult<Subcategory> {
        let name = validation::required_name(payload.name.as_deref())?;
        let image = validation::required_image(payload.image.as_deref())?;
        let description = validation::required_description(payload.description.as_deref())?;
        let category_id =
            validation::required_text("category", payload.category.as_deref(), MAX_NAME_LEN)?;

        let mut tx = self.pool.begin().await?;

        if category::fetch_category(&mut *tx, &category_id).await?.is_none() {
            return Err(DbError::not_found("Category", category_id.as_str()));
        }

        let subcategory = Subcategory {
            id: category::generate_id(),
            name,
            image,
            description,
            tax_applicability: payload.tax_applicability,
            tax: payload.tax.unwrap_or(0.0),
            tax_type: payload.tax_type,
            items: payload.items,
            category: category_id.clone(),
        };

        debug!(id = %subcategory.id, category = %category_id, "Inserting subcategory");

        sqlx::query(
            "INSERT INTO subcategories \
             (id, name, image, description, tax_applicability, tax, tax_type, items, category) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&subcategory.id)
        .bind(&subcategory.name)
        .bind(&subcategory.image)
        .bind(&subcategory.description)
        .bind(subcategory.tax_applicability)
        .bind(subcategory.tax)
        .bind(subcategory.tax_type.as_str())
        .bind(encode_id_list(&subcategory.items)?)
        .bind(&subcategory.category)
        .execute(&mut *tx)
        .await?;

        category::link_subcategory(&mut *tx, &category_id, &subcategory.id).await?;

        tx.commit().await?;

        Ok(subcategory)
    }

    /// Lists every subcategory in insertion order.
    pub async fn get_all(&self) -> DbResult<Vec<Subcategory>> {
        let rows: Vec<SubcategoryRow> = sqlx::query_as(
            "SELECT id, name, image, description, tax_applicability, tax, tax_type, items, category \
             FROM subcategories ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Subcategory::try_from).collect()
    }

    /// Lists subcategories belonging to a category.
    ///
    /// The category id is not validated: an unknown id yields an empty
    /// list, never NotFound.
    pub async fn get_by_category(&self, category_id: &str) -> DbResult<Vec<Subcategory>> {
        let rows: Vec<SubcategoryRow> = sqlx::query_as(
            "SELECT id, name, image, description, tax_applicability, tax, tax_type, items, category \
             FROM subcategories WHERE category = ?1 ORDER BY rowid",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Subcategory::try_from).collect()
    }

    /// Gets a subcategory by typed lookup key (id or exact name).
    pub async fn get_by_key(&self, key: &LookupKey) -> DbResult<Option<Subcategory>> {
        let row: Option<SubcategoryRow> = match key {
            LookupKey::Id(id) => {
                sqlx::query_as(
                    "SELECT id, name, image, description, tax_applicability, tax, tax_type, items, category \
                     FROM subcategories WHERE id = ?1",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
            LookupKey::Name(name) => {
                sqlx::query_as(
                    "SELECT id, name, image, description, tax_applicability, tax, tax_type, items, category \
                     FROM subcategories WHERE name = ?1 ORDER BY rowid LIMIT 1",
                )
                .bind(name)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        row.map(Subcategory::try_from).transpose()
    }

    /// Updates a subcategory: full overwrite of all mutable fields,
    /// including `category` and `items`.
    ///
    /// Reassigning `category` does NOT move this subcategory's id between
    /// the old and new parent's subCategories lists, and the new parent is
    /// not checked for existence. Both gaps are preserved behavior.
    pub async fn update(&self, id: &str, payload: SubcategoryUpdate) -> DbResult<Subcategory> {
        let name = validation::required_name(payload.name.as_deref())?;
        let image = validation::required_image(payload.image.as_deref())?;
        let description = validation::required_description(payload.description.as_deref())?;
        let category_id =
            validation::required_text("category", payload.category.as_deref(), MAX_NAME_LEN)?;

        debug!(id = %id, "Updating subcategory");

        let result = sqlx::query(
            "UPDATE subcategories SET \
                 name = ?2, \
                 image = ?3, \
                 description = ?4, \
                 tax_applicability = ?5, \
                 tax = ?6, \
                 category = ?7, \
                 items = ?8 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&name)
        .bind(&image)
        .bind(&description)
        .bind(payload.tax_applicability)
        .bind(payload.tax.unwrap_or(0.0))
        .bind(&category_id)
        .bind(encode_id_list(&payload.items)?)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Subcategory", id));
        }

        fetch_subcategory(&self.pool, id)
            .await?
            .ok_or_else(|| DbError::not_found("Subcategory", id))
    }

    /// Deletes a subcategory.
    ///
    /// No cascade and no parent-list cleanup: the parent category's
    /// subCategories list keeps the deleted id.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting subcategory");

        let result = sqlx::query("DELETE FROM subcategories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Subcategory", id));
        }

        Ok(())
    }
}

// =============================================================================
// Internal Helpers (used by the item create flow)
// =============================================================================

/// Fetches a subcategory through any executor.
pub(crate) async fn fetch_subcategory<'e, E>(executor: E, id: &str) -> DbResult<Option<Subcategory>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: Option<SubcategoryRow> = sqlx::query_as(
        "SELECT id, name, image, description, tax_applicability, tax, tax_type, items, category \
         FROM subcategories WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    row.map(Subcategory::try_from).transpose()
}

/// Appends an item id to a subcategory's items list.
///
/// Invoked only from `ItemRepository::create`, inside its transaction.
pub(crate) async fn link_item(
    conn: &mut SqliteConnection,
    subcategory_id: &str,
    item_id: &str,
) -> DbResult<()> {
    let raw: Option<String> = sqlx::query_scalar("SELECT items FROM subcategories WHERE id = ?1")
        .bind(subcategory_id)
        .fetch_optional(&mut *conn)
        .await?;

    let raw = raw.ok_or_else(|| DbError::not_found("Subcategory", subcategory_id))?;
    let mut ids = parse_id_list(&raw)?;
    ids.push(item_id.to_string());

    sqlx::query("UPDATE subcategories SET items = ?2 WHERE id = ?1")
        .bind(subcategory_id)
        .bind(encode_id_list(&ids)?)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
