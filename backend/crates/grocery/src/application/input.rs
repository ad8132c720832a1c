//! Use case inputs
//!
//! Raw request values; each is validated into a value object before it
//! reaches the domain.

use kernel::id::GroceryItemId;

use crate::domain::entity::{GroceryItemPatch, NewGroceryItem};
use crate::domain::value_object::{Category, Description, ImageUrl, ItemName, Price, Quantity};
use crate::error::{GroceryError, GroceryResult};

#[derive(Debug, Clone)]
pub struct CreateItemInput {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub category: String,
    pub image_url: Option<String>,
    /// Defaults to `true`
    pub is_available: Option<bool>,
}

impl CreateItemInput {
    pub fn validate(self) -> GroceryResult<NewGroceryItem> {
        Ok(NewGroceryItem {
            name: ItemName::new(&self.name)?,
            description: self.description.map(Description::new).transpose()?,
            price: Price::new(self.price)?,
            quantity: Quantity::new(self.quantity)?,
            category: Category::new(&self.category)?,
            image_url: self.image_url.map(ImageUrl::new).transpose()?,
            is_available: self.is_available.unwrap_or(true),
        })
    }
}

/// Partial update; `None` means "not sent"
///
/// `description` and `image_url` distinguish "not sent" (`None`) from an
/// explicit `null` (`Some(None)`), which clears the field.
#[derive(Debug, Clone, Default)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub category: Option<String>,
    pub image_url: Option<Option<String>>,
    pub is_available: Option<bool>,
}

impl UpdateItemInput {
    pub fn validate(self) -> GroceryResult<GroceryItemPatch> {
        Ok(GroceryItemPatch {
            name: self.name.map(ItemName::new).transpose()?,
            description: self
                .description
                .map(|value| value.map(Description::new).transpose())
                .transpose()?,
            price: self.price.map(Price::new).transpose()?,
            quantity: self.quantity.map(Quantity::new).transpose()?,
            category: self.category.map(Category::new).transpose()?,
            image_url: self
                .image_url
                .map(|value| value.map(ImageUrl::new).transpose())
                .transpose()?,
            is_available: self.is_available,
        })
    }
}

/// Parse a path id; anything but a UUID is a bad request
pub fn parse_item_id(raw: &str) -> GroceryResult<GroceryItemId> {
    raw.parse().map_err(|_| GroceryError::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateItemInput {
        CreateItemInput {
            name: "  Organic Bananas ".to_string(),
            description: None,
            price: 2.99,
            quantity: 10,
            category: "Fruits".to_string(),
            image_url: None,
            is_available: None,
        }
    }

    #[test]
    fn test_create_defaults_available() {
        let item = create_input().validate().unwrap();
        assert!(item.is_available);
        assert_eq!(item.name.as_str(), "Organic Bananas");
    }

    #[test]
    fn test_create_reports_first_invalid_field() {
        let input = CreateItemInput {
            quantity: 0,
            ..create_input()
        };
        let err = input.validate().unwrap_err();
        assert!(matches!(err, GroceryError::Validation(msg) if msg.contains("quantity")));
    }

    #[test]
    fn test_empty_description_accepted() {
        let item = CreateItemInput {
            description: Some(String::new()),
            ..create_input()
        }
        .validate()
        .unwrap();
        assert_eq!(item.description.map(|d| d.into_inner()), Some(String::new()));

        let patch = UpdateItemInput {
            description: Some(Some(" ".to_string())),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert!(matches!(patch.description, Some(Some(d)) if d.as_str().is_empty()));
    }

    #[test]
    fn test_update_validates_present_fields_only() {
        let patch = UpdateItemInput {
            price: Some(1.5),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.price.map(|p| p.value()), Some(1.5));

        let err = UpdateItemInput {
            name: Some("   ".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, GroceryError::Validation(_)));
    }

    #[test]
    fn test_update_null_clears_nullable_fields() {
        let patch = UpdateItemInput {
            description: Some(None),
            image_url: Some(None),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert!(matches!(patch.description, Some(None)));
        assert!(matches!(patch.image_url, Some(None)));
    }

    #[test]
    fn test_parse_item_id() {
        assert!(parse_item_id("not-an-id").is_err());
        assert!(matches!(
            parse_item_id("507f1f77bcf86cd799439011"),
            Err(GroceryError::InvalidId)
        ));

        let id = GroceryItemId::new();
        assert_eq!(parse_item_id(&id.to_string()).unwrap(), id);
    }
}
