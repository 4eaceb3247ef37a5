//! # Domain Types
//!
//! Entity and payload types for the menu backend.
//!
//! ## Type Groups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Entities (stored + returned):   Category, Subcategory, Item           │
//! │  Create payloads (POST bodies):  NewCategory, NewSubcategory, NewItem   │
//! │  Update payloads (PUT bodies):   CategoryUpdate, SubcategoryUpdate,     │
//! │                                  ItemUpdate                             │
//! │  Support:                        TaxType, LookupKey                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All types serialize with camelCase field names so the structs mirror the
//! JSON wire contract directly (`taxApplicability`, `subCategories`,
//! `baseAmount`, ...).
//!
//! Update payloads carry the full replacement value for every mutable
//! field: updates overwrite, they never merge. A field left out of a PUT
//! body is validated (and rejected) exactly as it would be on create.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Tax Type
// =============================================================================

/// How an entity's tax value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxType {
    /// Tax is a percentage of the amount.
    Percentage,
    /// Tax is a fixed amount.
    Fixed,
}

impl TaxType {
    /// Returns the canonical string form ("percentage" / "fixed").
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxType::Percentage => "percentage",
            TaxType::Fixed => "fixed",
        }
    }

    /// Parses the canonical string form.
    pub fn parse(s: &str) -> Option<TaxType> {
        match s {
            "percentage" => Some(TaxType::Percentage),
            "fixed" => Some(TaxType::Fixed),
            _ => None,
        }
    }
}

impl Default for TaxType {
    fn default() -> Self {
        TaxType::Percentage
    }
}

// =============================================================================
// Lookup Key
// =============================================================================

/// A typed id-or-name lookup key.
///
/// The `GET .../:idOrName` endpoints accept either a store identifier or an
/// exact entity name in the same path segment. This type classifies the raw
/// segment once, at the edge, so repositories never sniff string formats
/// themselves: anything that parses as a UUID is an id lookup, everything
/// else is a name lookup.
///
/// ## Example
/// ```rust
/// use menu_core::LookupKey;
///
/// let key = LookupKey::parse("550e8400-e29b-41d4-a716-446655440000");
/// assert!(matches!(key, LookupKey::Id(_)));
///
/// let key = LookupKey::parse("Cold Drinks");
/// assert!(matches!(key, LookupKey::Name(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    /// The segment is a store identifier.
    Id(String),
    /// The segment is an exact entity name.
    Name(String),
}

impl LookupKey {
    /// Classifies a raw path segment as an id or a name.
    pub fn parse(raw: &str) -> LookupKey {
        if Uuid::parse_str(raw).is_ok() {
            LookupKey::Id(raw.to_string())
        } else {
            LookupKey::Name(raw.to_string())
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A top-level menu category.
///
/// `sub_categories` and `items` are denormalized caches of child ids,
/// appended to only by the child create flows. They are not authoritative:
/// a child delete leaves its id behind (dangling reference).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier (UUID v4, store-assigned).
    pub id: String,

    /// Display name. Unique by convention; usable as a lookup key.
    pub name: String,

    /// Image URL.
    pub image: String,

    /// Description text.
    pub description: String,

    /// Whether tax applies to this category.
    pub tax_applicability: bool,

    /// Tax value. Present whenever `tax_applicability` is true.
    pub tax: Option<f64>,

    /// How `tax` is interpreted.
    pub tax_type: TaxType,

    /// Child subcategory ids, in creation order.
    pub sub_categories: Vec<String>,

    /// Child item ids, in creation order.
    pub items: Vec<String>,
}

/// Payload for creating a Category.
///
/// Required fields are modeled as `Option` so that a missing field surfaces
/// as a [`ValidationError`](crate::ValidationError) rather than a
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tax_applicability: bool,
    /// Required when `tax_applicability` is true (conditional-required).
    pub tax: Option<f64>,
    #[serde(default)]
    pub tax_type: TaxType,
}

/// Payload for updating a Category.
///
/// Full overwrite of the five mutable fields. `tax_type` and the child id
/// lists are not part of the update surface.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tax_applicability: bool,
    pub tax: Option<f64>,
}

// =============================================================================
// Subcategory
// =============================================================================

/// A subcategory belonging to exactly one Category.
///
/// The `category` reference is validated to exist at creation time only;
/// deleting the parent later leaves this reference dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    /// Unique identifier (UUID v4, store-assigned).
    pub id: String,

    pub name: String,
    pub image: String,
    pub description: String,
    pub tax_applicability: bool,

    /// Tax value. Unlike Category, defaults to 0 unconditionally.
    pub tax: f64,

    pub tax_type: TaxType,

    /// Child item ids, in creation order.
    pub items: Vec<String>,

    /// Owning Category id.
    pub category: String,
}

/// Payload for creating a Subcategory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubcategory {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tax_applicability: bool,
    pub tax: Option<f64>,
    #[serde(default)]
    pub tax_type: TaxType,
    /// Must reference an existing Category.
    pub category: Option<String>,
    /// Optional initial item id list.
    #[serde(default)]
    pub items: Vec<String>,
}

/// Payload for updating a Subcategory.
///
/// Full overwrite including `category` and `items`. Reassigning `category`
/// does not move this subcategory's id between the old and new parent's
/// `subCategories` lists (latent inconsistency, preserved by design).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryUpdate {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tax_applicability: bool,
    pub tax: Option<f64>,
    pub category: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

// =============================================================================
// Item
// =============================================================================

/// A menu item referencing one Category and one Subcategory.
///
/// `total_amount` is computed by the caller, not derived here: the server
/// does no money arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier (UUID v4, store-assigned).
    pub id: String,

    pub name: String,
    pub image: String,
    pub description: String,
    pub tax_applicability: bool,
    pub tax: f64,

    /// Base price. Required.
    pub base_amount: f64,

    /// Discount applied. Defaults to 0.
    pub discount: f64,

    /// Final price as supplied by the caller. Required.
    pub total_amount: f64,

    /// Owning Category id.
    pub category: String,

    /// Owning Subcategory id. Should belong to `category`, though that
    /// relationship is not enforced.
    pub subcategory: String,
}

/// Payload for creating an Item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tax_applicability: bool,
    pub tax: Option<f64>,
    pub base_amount: Option<f64>,
    pub discount: Option<f64>,
    pub total_amount: Option<f64>,
    /// Must reference an existing Category.
    pub category: Option<String>,
    /// Must reference an existing Subcategory.
    pub subcategory: Option<String>,
}

/// Payload for updating an Item.
///
/// Full overwrite of all mutable fields including both parent references.
/// New parents are not re-validated and no parent item list is touched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tax_applicability: bool,
    pub tax: Option<f64>,
    pub base_amount: Option<f64>,
    pub discount: Option<f64>,
    pub total_amount: Option<f64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_key_classifies_uuid_as_id() {
        let key = LookupKey::parse("550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(
            key,
            LookupKey::Id("550e8400-e29b-41d4-a716-446655440000".to_string())
        );
    }

    #[test]
    fn test_lookup_key_classifies_other_as_name() {
        assert_eq!(
            LookupKey::parse("Cold Drinks"),
            LookupKey::Name("Cold Drinks".to_string())
        );
        // Close-but-wrong UUIDs fall back to name matching
        assert_eq!(
            LookupKey::parse("550e8400-e29b-41d4"),
            LookupKey::Name("550e8400-e29b-41d4".to_string())
        );
    }

    #[test]
    fn test_tax_type_default() {
        assert_eq!(TaxType::default(), TaxType::Percentage);
    }

    #[test]
    fn test_tax_type_round_trip() {
        assert_eq!(TaxType::parse("percentage"), Some(TaxType::Percentage));
        assert_eq!(TaxType::parse("fixed"), Some(TaxType::Fixed));
        assert_eq!(TaxType::parse("flat"), None);
        assert_eq!(TaxType::Fixed.as_str(), "fixed");
    }

    #[test]
    fn test_category_serializes_camel_case() {
        let category = Category {
            id: "c1".to_string(),
            name: "Beverages".to_string(),
            image: "img".to_string(),
            description: "desc".to_string(),
            tax_applicability: false,
            tax: None,
            tax_type: TaxType::Percentage,
            sub_categories: vec!["s1".to_string()],
            items: vec![],
        };

        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["taxApplicability"], false);
        assert_eq!(json["taxType"], "percentage");
        assert_eq!(json["subCategories"][0], "s1");
    }

    #[test]
    fn test_new_item_defaults() {
        let payload: NewItem = serde_json::from_str(
            r#"{"name":"Cola","image":"i","description":"d","baseAmount":50,"totalAmount":50,"category":"c1","subcategory":"s1"}"#,
        )
        .unwrap();

        assert!(!payload.tax_applicability);
        assert_eq!(payload.tax, None);
        assert_eq!(payload.discount, None);
        assert_eq!(payload.base_amount, Some(50.0));
    }
}
