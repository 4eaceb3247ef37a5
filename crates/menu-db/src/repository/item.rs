//! # Item Repository
//!
//! Database operations for menu items, the leaves of the entity graph.
//!
//! An item create touches three tables in a single transaction: the item
//! row itself plus one id-list append on each of its two parents. Parent
//! existence is checked category-first, so a bad category id short-circuits
//! before the subcategory is ever looked at.

use sqlx::{SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{category, subcategory};
use menu_core::{validation, Item, ItemUpdate, LookupKey, NewItem, MAX_NAME_LEN};

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: String,
    name: String,
    image: String,
    description: String,
    tax_applicability: bool,
    tax: f64,
    base_amount: f64,
    discount: f64,
    total_amount: f64,
    category: String,
    subcategory: String,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Item {
        Item {
            id: row.id,
            name: row.name,
            image: row.image,
            description: row.description,
            tax_applicability: row.tax_applicability,
            tax: row.tax,
            base_amount: row.base_amount,
            discount: row.discount,
            total_amount: row.total_amount,
            category: row.category,
            subcategory: row.subcategory,
        }
    }
}

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Creates an item under an existing category and subcategory.
    ///
    /// ## Errors
    /// * `DbError::Validation` - missing/blank required fields or amounts
    /// * `DbError::NotFound("Category")` - unknown category id
    /// * `DbError::NotFound("Subcategory")` - unknown subcategory id
    ///
    /// On any error nothing is persisted: the item row and both parent
    /// list appends commit together or roll back together.
    pub async fn create(&self, payload: NewItem) -> DbResult<Item> {
        let name = validation::required_name(payload.name.as_deref())?;
        let image = validation::required_image(payload.image.as_deref())?;
        let description = validation::required_description(payload.description.as_deref())?;
        let base_amount = validation::required_number("baseAmount", payload.base_amount)?;
        let total_amount = validation::required_number("totalAmount", payload.total_amount)?;
        let category_id =
            validation::required_text("category", payload.category.as_deref(), MAX_NAME_LEN)?;
        let subcategory_id =
            validation::required_text("subcategory", payload.subcategory.as_deref(), MAX_NAME_LEN)?;

        let mut tx: Transaction<'_, sqlx::Sqlite> = self.pool.begin().await?;

        if category::fetch_category(&mut *tx, &category_id).await?.is_none() {
            return Err(DbError::not_found("Category", category_id.as_str()));
        }
        if subcategory::fetch_subcategory(&mut *tx, &subcategory_id)
            .await?
            .is_none()
        {
            return Err(DbError::not_found("Subcategory", subcategory_id.as_str()));
        }

        let item = Item {
            id: category::generate_id(),
            name,
            image,
            description,
            tax_applicability: payload.tax_applicability,
            tax: payload.tax.unwrap_or(0.0),
            base_amount,
            discount: payload.discount.unwrap_or(0.0),
            total_amount,
            category: category_id.clone(),
            subcategory: subcategory_id.clone(),
        };

        debug!(id = %item.id, category = %category_id, subcategory = %subcategory_id, "Inserting item");

        sqlx::query(
            "INSERT INTO items \
             (id, name, image, description, tax_applicability, tax, \
              base_amount, discount, total_amount, category, subcategory) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.image)
        .bind(&item.description)
        .bind(item.tax_applicability)
        .bind(item.tax)
        .bind(item.base_amount)
        .bind(item.discount)
        .bind(item.total_amount)
        .bind(&item.category)
        .bind(&item.subcategory)
        .execute(&mut *tx)
        .await?;

        category::link_item(&mut *tx, &category_id, &item.id).await?;
        subcategory::link_item(&mut *tx, &subcategory_id, &item.id).await?;

        tx.commit().await?;

        Ok(item)
    }

    /// Lists every item in insertion order.
    pub async fn get_all(&self) -> DbResult<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT id, name, image, description, tax_applicability, tax, \
             base_amount, discount, total_amount, category, subcategory \
             FROM items ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Gets an item by typed lookup key (id or exact name).
    pub async fn get_by_key(&self, key: &LookupKey) -> DbResult<Option<Item>> {
        let row: Option<ItemRow> = match key {
            LookupKey::Id(id) => {
                sqlx::query_as(
                    "SELECT id, name, image, description, tax_applicability, tax, \
                     base_amount, discount, total_amount, category, subcategory \
                     FROM items WHERE id = ?1",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
            LookupKey::Name(name) => {
                sqlx::query_as(
                    "SELECT id, name, image, description, tax_applicability, tax, \
                     base_amount, discount, total_amount, category, subcategory \
                     FROM items WHERE name = ?1 ORDER BY rowid LIMIT 1",
                )
                .bind(name)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        Ok(row.map(Item::from))
    }

    /// Finds the first item whose name matches exactly.
    ///
    /// Backs the search endpoint. Exact match only, no pattern or
    /// case folding.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Item>> {
        let row: Option<ItemRow> = sqlx::query_as(
            "SELECT id, name, image, description, tax_applicability, tax, \
             base_amount, discount, total_amount, category, subcategory \
             FROM items WHERE name = ?1 ORDER BY rowid LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    /// Lists items belonging to a category. The id is not validated.
    pub async fn get_by_category(&self, category_id: &str) -> DbResult<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT id, name, image, description, tax_applicability, tax, \
             base_amount, discount, total_amount, category, subcategory \
             FROM items WHERE category = ?1 ORDER BY rowid",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Lists items belonging to a subcategory. The id is not validated.
    pub async fn get_by_subcategory(&self, subcategory_id: &str) -> DbResult<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT id, name, image, description, tax_applicability, tax, \
             base_amount, discount, total_amount, category, subcategory \
             FROM items WHERE subcategory = ?1 ORDER BY rowid",
        )
        .bind(subcategory_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Updates an item: full overwrite of every field except the id.
    ///
    /// Parent ids are overwritten without existence checks and without
    /// moving the item's id between parent lists. Preserved behavior.
    pub async fn update(&self, id: &str, payload: ItemUpdate) -> DbResult<Item> {
        let name = validation::required_name(payload.name.as_deref())?;
        let image = validation::required_image(payload.image.as_deref())?;
        let description = validation::required_description(payload.description.as_deref())?;
        let base_amount = validation::required_number("baseAmount", payload.base_amount)?;
        let total_amount = validation::required_number("totalAmount", payload.total_amount)?;
        let category_id =
            validation::required_text("category", payload.category.as_deref(), MAX_NAME_LEN)?;
        let subcategory_id =
            validation::required_text("subcategory", payload.subcategory.as_deref(), MAX_NAME_LEN)?;

        debug!(id = %id, "Updating item");

        let result = sqlx::query(
            "UPDATE items SET \
                 name = ?2, \
                 image = ?3, \
                 description = ?4, \
                 tax_applicability = ?5, \
                 tax = ?6, \
                 base_amount = ?7, \
                 discount = ?8, \
                 total_amount = ?9, \
                 category = ?10, \
                 subcategory = ?11 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&name)
        .bind(&image)
        .bind(&description)
        .bind(payload.tax_applicability)
        .bind(payload.tax.unwrap_or(0.0))
        .bind(base_amount)
        .bind(payload.discount.unwrap_or(0.0))
        .bind(total_amount)
        .bind(&category_id)
        .bind(&subcategory_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        self.get_by_key(&LookupKey::Id(id.to_string()))
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))
    }

    /// Deletes an item. Parent id lists are not cleaned up.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testutil::test_db;
    use crate::Database;
    use menu_core::{NewCategory, NewSubcategory, TaxType};

    async fn seed_parents(db: &Database) -> (String, String) {
        let category = db
            .categories()
            .create(NewCategory {
                name: Some("Beverages".to_string()),
                image: Some("https://img.example/bev.png".to_string()),
                description: Some("Drinks of all kinds".to_string()),
                tax_applicability: false,
                tax: None,
                tax_type: TaxType::Percentage,
            })
            .await
            .unwrap();

        let subcategory = db
            .subcategories()
            .create(NewSubcategory {
                name: Some("Cold Drinks".to_string()),
                image: Some("https://img.example/cold.png".to_string()),
                description: Some("Chilled beverages".to_string()),
                tax_applicability: false,
                tax: None,
                tax_type: TaxType::Percentage,
                category: Some(category.id.clone()),
                items: Vec::new(),
            })
            .await
            .unwrap();

        (category.id, subcategory.id)
    }

    fn cola(category: &str, subcategory: &str) -> NewItem {
        NewItem {
            name: Some("Cola".to_string()),
            image: Some("https://img.example/cola.png".to_string()),
            description: Some("Fizzy and cold".to_string()),
            tax_applicability: true,
            tax: Some(5.0),
            base_amount: Some(40.0),
            discount: Some(5.0),
            total_amount: Some(35.0),
            category: Some(category.to_string()),
            subcategory: Some(subcategory.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_links_both_parents() {
        let db = test_db().await;
        let (category_id, subcategory_id) = seed_parents(&db).await;

        let item = db
            .items()
            .create(cola(&category_id, &subcategory_id))
            .await
            .unwrap();

        let category = db
            .categories()
            .get_by_id(&category_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(category.items, vec![item.id.clone()]);

        let subcategory = db
            .subcategories()
            .get_by_key(&LookupKey::Id(subcategory_id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(subcategory.items, vec![item.id]);
    }

    #[tokio::test]
    async fn test_create_with_missing_subcategory_rolls_back() {
        let db = test_db().await;
        let (category_id, _) = seed_parents(&db).await;

        let err = db
            .items()
            .create(cola(&category_id, "550e8400-e29b-41d4-a716-446655440000"))
            .await
            .unwrap_err();

        match err {
            DbError::NotFound { entity, .. } => assert_eq!(entity, "Subcategory"),
            other => panic!("expected NotFound, got {other:?}"),
        }

        // Nothing persisted and the valid parent's list stayed empty.
        assert!(db.items().get_all().await.unwrap().is_empty());
        let category = db
            .categories()
            .get_by_id(&category_id)
            .await
            .unwrap()
            .unwrap();
        assert!(category.items.is_empty());
    }

    #[tokio::test]
    async fn test_create_checks_category_first() {
        let db = test_db().await;
        let (_, subcategory_id) = seed_parents(&db).await;

        let err = db
            .items()
            .create(cola("6ba7b810-9dad-11d1-80b4-00c04fd430c8", &subcategory_id))
            .await
            .unwrap_err();

        match err {
            DbError::NotFound { entity, .. } => assert_eq!(entity, "Category"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_requires_amounts() {
        let db = test_db().await;
        let (category_id, subcategory_id) = seed_parents(&db).await;

        let mut payload = cola(&category_id, &subcategory_id);
        payload.base_amount = None;

        let err = db.items().create(payload).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert!(db.items().get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_matches_key_lookup_by_name() {
        let db = test_db().await;
        let (category_id, subcategory_id) = seed_parents(&db).await;
        let item = db
            .items()
            .create(cola(&category_id, &subcategory_id))
            .await
            .unwrap();

        let by_search = db.items().get_by_name("Cola").await.unwrap().unwrap();
        let by_key = db
            .items()
            .get_by_key(&LookupKey::parse("Cola"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_search.id, item.id);
        assert_eq!(by_key.id, item.id);

        assert!(db.items().get_by_name("Pepsi").await.unwrap().is_none());
        assert!(db
            .items()
            .get_by_key(&LookupKey::parse("Pepsi"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_parent_listings() {
        let db = test_db().await;
        let (category_id, subcategory_id) = seed_parents(&db).await;
        db.items()
            .create(cola(&category_id, &subcategory_id))
            .await
            .unwrap();

        assert_eq!(db.items().get_by_category(&category_id).await.unwrap().len(), 1);
        assert_eq!(
            db.items()
                .get_by_subcategory(&subcategory_id)
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(db.items().get_by_category("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let db = test_db().await;
        let (category_id, subcategory_id) = seed_parents(&db).await;
        let item = db
            .items()
            .create(cola(&category_id, &subcategory_id))
            .await
            .unwrap();

        let updated = db
            .items()
            .update(
                &item.id,
                ItemUpdate {
                    name: Some("Diet Cola".to_string()),
                    image: Some("https://img.example/diet.png".to_string()),
                    description: Some("Zero sugar".to_string()),
                    tax_applicability: false,
                    tax: None,
                    base_amount: Some(45.0),
                    discount: None,
                    total_amount: Some(45.0),
                    category: Some(category_id.clone()),
                    subcategory: Some(subcategory_id.clone()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Diet Cola");
        assert_eq!(updated.tax, 0.0);
        assert_eq!(updated.discount, 0.0);
        assert_eq!(updated.total_amount, 45.0);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_item() {
        let db = test_db().await;
        let (category_id, subcategory_id) = seed_parents(&db).await;

        let err = db
            .items()
            .update(
                "550e8400-e29b-41d4-a716-446655440000",
                ItemUpdate {
                    name: Some("Ghost".to_string()),
                    image: Some("https://img.example/g.png".to_string()),
                    description: Some("not there".to_string()),
                    tax_applicability: false,
                    tax: None,
                    base_amount: Some(1.0),
                    discount: None,
                    total_amount: Some(1.0),
                    category: Some(category_id),
                    subcategory: Some(subcategory_id),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = db.items().delete("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
