//! # Category Repository
//!
//! Database operations for categories.
//!
//! Besides its own CRUD surface, this module owns the internal link
//! helpers the child create flows use to append a freshly created
//! subcategory/item id to the parent category's denormalized lists. Those
//! helpers operate on a borrowed connection so the caller can run them
//! inside its own transaction.

use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::{encode_id_list, parse_id_list, parse_tax_type};
use menu_core::{validation, Category, CategoryUpdate, LookupKey, NewCategory};

/// Raw row as stored; id lists and tax_type are decoded in `TryFrom`.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    image: String,
    description: String,
    tax_applicability: bool,
    tax: Option<f64>,
    tax_type: String,
    sub_categories: String,
    items: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DbError;

    fn try_from(row: CategoryRow) -> DbResult<Category> {
        Ok(Category {
            id: row.id,
            name: row.name,
            image: row.image,
            description: row.description,
            tax_applicability: row.tax_applicability,
            tax: row.tax,
            tax_type: parse_tax_type(&row.tax_type)?,
            sub_categories: parse_id_list(&row.sub_categories)?,
            items: parse_id_list(&row.items)?,
        })
    }
}

/// Repository for category database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.categories();
/// let category = repo.create(payload).await?;
/// let found = repo.get_by_key(&LookupKey::parse("Beverages")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Creates a category.
    ///
    /// ## Validation
    /// - name/image/description must be present and non-blank
    /// - tax is required iff taxApplicability is true
    ///
    /// Child id lists always start empty; they are only ever appended to
    /// by the subcategory/item create flows.
    pub async fn create(&self, payload: NewCategory) -> DbResult<Category> {
        let name = validation::required_name(payload.name.as_deref())?;
        let image = validation::required_image(payload.image.as_deref())?;
        let description = validation::required_description(payload.description.as_deref())?;
        let tax = validation::category_tax(payload.tax_applicability, payload.tax)?;

        let category = Category {
            id: generate_id(),
            name,
            image,
            description,
            tax_applicability: payload.tax_applicability,
            tax,
            tax_type: payload.tax_type,
            sub_categories: Vec::new(),
            items: Vec::new(),
        };

        debug!(id = %category.id, name = %category.name, "Inserting category");

        sqlx::query(
            "INSERT INTO categories \
             (id, name, image, description, tax_applicability, tax, tax_type, sub_categories, items) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.image)
        .bind(&category.description)
        .bind(category.tax_applicability)
        .bind(category.tax)
        .bind(category.tax_type.as_str())
        .bind(encode_id_list(&category.sub_categories)?)
        .bind(encode_id_list(&category.items)?)
        .execute(&self.pool)
        .await?;

        Ok(category)
    }

    /// Lists every category in insertion order.
    pub async fn get_all(&self) -> DbResult<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            "SELECT id, name, image, description, tax_applicability, tax, tax_type, sub_categories, items \
             FROM categories ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Category::try_from).collect()
    }

    /// Gets a category by typed lookup key (id or exact name).
    ///
    /// ## Returns
    /// * `Ok(Some(Category))` - Match found
    /// * `Ok(None)` - No match
    pub async fn get_by_key(&self, key: &LookupKey) -> DbResult<Option<Category>> {
        let row: Option<CategoryRow> = match key {
            LookupKey::Id(id) => {
                sqlx::query_as(
                    "SELECT id, name, image, description, tax_applicability, tax, tax_type, sub_categories, items \
                     FROM categories WHERE id = ?1",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
            LookupKey::Name(name) => {
                // Names are unique by convention only: first match in
                // insertion order wins.
                sqlx::query_as(
                    "SELECT id, name, image, description, tax_applicability, tax, tax_type, sub_categories, items \
                     FROM categories WHERE name = ?1 ORDER BY rowid LIMIT 1",
                )
                .bind(name)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        row.map(Category::try_from).transpose()
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        fetch_category(&self.pool, id).await
    }

    /// Updates a category: full overwrite of the five mutable fields.
    ///
    /// taxType and the child id lists are not part of the update surface.
    ///
    /// ## Returns
    /// * `Ok(Category)` - The post-update record
    /// * `Err(DbError::NotFound)` - Category doesn't exist
    pub async fn update(&self, id: &str, payload: CategoryUpdate) -> DbResult<Category> {
        let name = validation::required_name(payload.name.as_deref())?;
        let image = validation::required_image(payload.image.as_deref())?;
        let description = validation::required_description(payload.description.as_deref())?;
        let tax = validation::category_tax(payload.tax_applicability, payload.tax)?;

        debug!(id = %id, "Updating category");

        let result = sqlx::query(
            "UPDATE categories SET \
                 name = ?2, \
                 image = ?3, \
                 description = ?4, \
                 tax_applicability = ?5, \
                 tax = ?6 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&name)
        .bind(&image)
        .bind(&description)
        .bind(payload.tax_applicability)
        .bind(tax)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        fetch_category(&self.pool, id)
            .await?
            .ok_or_else(|| DbError::not_found("Category", id))
    }

    /// Deletes a category.
    ///
    /// No cascade: subcategories and items that referenced this category
    /// keep their (now dangling) references, and remain retrievable.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Internal Helpers (used by the child create flows)
// =============================================================================

/// Fetches a category through any executor, so the child create flows can
/// run the parent-existence check inside their own transaction.
pub(crate) async fn fetch_category<'e, E>(executor: E, id: &str) -> DbResult<Option<Category>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: Option<CategoryRow> = sqlx::query_as(
        "SELECT id, name, image, description, tax_applicability, tax, tax_type, sub_categories, items \
         FROM categories WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    row.map(Category::try_from).transpose()
}

/// Appends a subcategory id to a category's subCategories list.
///
/// Invoked only from `SubcategoryRepository::create`, inside its
/// transaction; the read-modify-write is therefore atomic with the child
/// insert.
pub(crate) async fn link_subcategory(
    conn: &mut SqliteConnection,
    category_id: &str,
    subcategory_id: &str,
) -> DbResult<()> {
    let raw: Option<String> =
        sqlx::query_scalar("SELECT sub_categories FROM categories WHERE id = ?1")
            .bind(category_id)
            .fetch_optional(&mut *conn)
            .await?;

    let raw = raw.ok_or_else(|| DbError::not_found("Category", category_id))?;
    let mut ids = parse_id_list(&raw)?;
    ids.push(subcategory_id.to_string());

    sqlx::query("UPDATE categories SET sub_categories = ?2 WHERE id = ?1")
        .bind(category_id)
        .bind(encode_id_list(&ids)?)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Appends an item id to a category's items list.
///
/// Invoked only from `ItemRepository::create`, inside its transaction.
pub(crate) async fn link_item(
    conn: &mut SqliteConnection,
    category_id: &str,
    item_id: &str,
) -> DbResult<()> {
    let raw: Option<String> = sqlx::query_scalar("SELECT items FROM categories WHERE id = ?1")
        .bind(category_id)
        .fetch_optional(&mut *conn)
        .await?;

    let raw = raw.ok_or_else(|| DbError::not_found("Category", category_id))?;
    let mut ids = parse_id_list(&raw)?;
    ids.push(item_id.to_string());

    sqlx::query("UPDATE categories SET items = ?2 WHERE id = ?1")
        .bind(category_id)
        .bind(encode_id_list(&ids)?)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Generates a new store identifier.
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testutil::test_db;
    use menu_core::TaxType;

    fn beverages() -> NewCategory {
        NewCategory {
            name: Some("Beverages".to_string()),
            image: Some("https://img.example/bev.png".to_string()),
            description: Some("Cold and hot drinks".to_string()),
            tax_applicability: false,
            tax: None,
            tax_type: TaxType::Percentage,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_by_id_and_name() {
        let db = test_db().await;
        let repo = db.categories();

        let created = repo.create(beverages()).await.unwrap();
        assert!(created.sub_categories.is_empty());
        assert!(created.items.is_empty());

        let by_id = repo
            .get_by_key(&LookupKey::parse(&created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_id, created);

        let by_name = repo
            .get_by_key(&LookupKey::parse("Beverages"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name, created);
    }

    #[tokio::test]
    async fn test_tax_conditionally_required() {
        let db = test_db().await;
        let repo = db.categories();

        let mut payload = beverages();
        payload.tax_applicability = true;
        let err = repo.create(payload.clone()).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        payload.tax = Some(5.0);
        let created = repo.create(payload).await.unwrap();
        assert_eq!(created.tax, Some(5.0));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_required_fields() {
        let db = test_db().await;
        let repo = db.categories();

        let mut payload = beverages();
        payload.image = Some("   ".to_string());
        let err = repo.create(payload).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        // Nothing persisted
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_insertion_order() {
        let db = test_db().await;
        let repo = db.categories();

        let mut first = beverages();
        first.name = Some("Starters".to_string());
        repo.create(first).await.unwrap();
        repo.create(beverages()).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Starters");
        assert_eq!(all[1].name, "Beverages");
    }

    #[tokio::test]
    async fn test_update_overwrites_all_mutable_fields() {
        let db = test_db().await;
        let repo = db.categories();
        let created = repo.create(beverages()).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                CategoryUpdate {
                    name: Some("Drinks".to_string()),
                    image: Some("https://img.example/drinks.png".to_string()),
                    description: Some("All drinks".to_string()),
                    tax_applicability: true,
                    tax: Some(12.5),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Drinks");
        assert_eq!(updated.tax, Some(12.5));
        // Immutable parts survive the overwrite
        assert_eq!(updated.tax_type, TaxType::Percentage);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let db = test_db().await;
        let err = db
            .categories()
            .update(
                "550e8400-e29b-41d4-a716-446655440000",
                CategoryUpdate {
                    name: Some("x".to_string()),
                    image: Some("x".to_string()),
                    description: Some("x".to_string()),
                    tax_applicability: false,
                    tax: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_record_only() {
        let db = test_db().await;
        let repo = db.categories();
        let created = repo.create(beverages()).await.unwrap();

        repo.delete(&created.id).await.unwrap();
        assert!(repo.get_by_id(&created.id).await.unwrap().is_none());

        let err = repo.delete(&created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
