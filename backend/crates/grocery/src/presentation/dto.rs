//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::{CreateItemInput, UpdateItemInput};
use crate::domain::entity::GroceryItem;

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
///
/// Use together with `#[serde(default)]`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Requests
// ============================================================================

/// POST /grocery
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl From<CreateItemRequest> for CreateItemInput {
    fn from(req: CreateItemRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            quantity: req.quantity,
            category: req.category,
            image_url: req.image_url,
            is_available: req.is_available,
        }
    }
}

/// PATCH /grocery/{id}
///
/// Every field is optional. `null` clears `description` and `imageUrl`;
/// on the other fields it is the same as leaving the field out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl From<UpdateItemRequest> for UpdateItemInput {
    fn from(req: UpdateItemRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            quantity: req.quantity,
            category: req.category,
            image_url: req.image_url,
            is_available: req.is_available,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItemResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub user_id: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroceryItem> for GroceryItemResponse {
    fn from(item: GroceryItem) -> Self {
        Self {
            id: item.grocery_item_id.to_string(),
            name: item.name.into_inner(),
            description: item.description.map(|d| d.into_inner()),
            price: item.price.value(),
            quantity: item.quantity.value(),
            category: item.category.into_inner(),
            image_url: item.image_url.map(|u| u.into_inner()),
            user_id: item.owner_id.to_string(),
            is_available: item.is_available,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let req: UpdateItemRequest =
            serde_json::from_str(r#"{"description":null,"name":null}"#).unwrap();
        assert_eq!(req.description, Some(None));
        assert_eq!(req.image_url, None);
        assert_eq!(req.name, None);

        let req: UpdateItemRequest =
            serde_json::from_str(r#"{"imageUrl":"https://example.com/a.png"}"#).unwrap();
        assert_eq!(
            req.image_url,
            Some(Some("https://example.com/a.png".to_string()))
        );
    }

    #[test]
    fn test_create_rejects_unknown_fields() {
        let result = serde_json::from_str::<CreateItemRequest>(
            r#"{"name":"Milk","price":1.2,"quantity":1,"category":"Dairy","userId":"x"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_rejects_fractional_quantity() {
        let result = serde_json::from_str::<CreateItemRequest>(
            r#"{"name":"Milk","price":1.2,"quantity":1.5,"category":"Dairy"}"#,
        );
        assert!(result.is_err());
    }
}
