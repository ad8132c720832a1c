//! Grocery Item Entity

use chrono::{DateTime, Utc};
use kernel::id::{GroceryItemId, UserId};

use crate::domain::value_object::{Category, Description, ImageUrl, ItemName, Price, Quantity};

/// A grocery item owned by exactly one user
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryItem {
    pub grocery_item_id: GroceryItemId,
    pub owner_id: UserId,
    pub name: ItemName,
    pub description: Option<Description>,
    pub price: Price,
    pub quantity: Quantity,
    pub category: Category,
    pub image_url: Option<ImageUrl>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new item
#[derive(Debug, Clone)]
pub struct NewGroceryItem {
    pub name: ItemName,
    pub description: Option<Description>,
    pub price: Price,
    pub quantity: Quantity,
    pub category: Category,
    pub image_url: Option<ImageUrl>,
    pub is_available: bool,
}

/// Validated partial update
///
/// `None` leaves a field untouched. For the nullable fields,
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct GroceryItemPatch {
    pub name: Option<ItemName>,
    pub description: Option<Option<Description>>,
    pub price: Option<Price>,
    pub quantity: Option<Quantity>,
    pub category: Option<Category>,
    pub image_url: Option<Option<ImageUrl>>,
    pub is_available: Option<bool>,
}

impl GroceryItem {
    pub fn create(owner_id: UserId, new: NewGroceryItem) -> Self {
        let now = Utc::now();

        Self {
            grocery_item_id: GroceryItemId::new(),
            owner_id,
            name: new.name,
            description: new.description,
            price: new.price,
            quantity: new.quantity,
            category: new.category,
            image_url: new.image_url,
            is_available: new.is_available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a patch and bump `updated_at`
    pub fn apply(&mut self, patch: GroceryItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(is_available) = patch.is_available {
            self.is_available = is_available;
        }

        self.updated_at = Utc::now().max(self.updated_at);
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bananas() -> NewGroceryItem {
        NewGroceryItem {
            name: ItemName::new("Organic Bananas").unwrap(),
            description: Some(Description::new("Fresh organic bananas").unwrap()),
            price: Price::new(2.99).unwrap(),
            quantity: Quantity::new(10).unwrap(),
            category: Category::new("Fruits").unwrap(),
            image_url: Some(ImageUrl::new("https://example.com/bananas.jpg").unwrap()),
            is_available: true,
        }
    }

    #[test]
    fn test_create_sets_owner_and_timestamps() {
        let owner = UserId::new();
        let item = GroceryItem::create(owner, bananas());

        assert!(item.is_owned_by(&owner));
        assert!(!item.is_owned_by(&UserId::new()));
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_apply_merges_only_given_fields() {
        let mut item = GroceryItem::create(UserId::new(), bananas());
        let created_at = item.created_at;

        item.apply(GroceryItemPatch {
            price: Some(Price::new(3.49).unwrap()),
            description: Some(None),
            ..Default::default()
        });

        assert_eq!(item.price.value(), 3.49);
        assert_eq!(item.description, None);
        assert_eq!(item.name.as_str(), "Organic Bananas");
        assert!(item.image_url.is_some());
        assert_eq!(item.created_at, created_at);
        assert!(item.updated_at >= created_at);
    }
}
