//! In-memory grocery store
//!
//! Used by tests and by `api` when no database is wanted.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{GroceryItemId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::GroceryItem;
use crate::domain::repository::GroceryRepository;
use crate::error::GroceryResult;

#[derive(Clone, Default)]
pub struct InMemoryGroceryRepository {
    items: Arc<RwLock<HashMap<GroceryItemId, GroceryItem>>>,
}

impl InMemoryGroceryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

impl GroceryRepository for InMemoryGroceryRepository {
    async fn insert(&self, item: &GroceryItem) -> GroceryResult<()> {
        self.items
            .write()
            .await
            .insert(item.grocery_item_id, item.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> GroceryResult<Vec<GroceryItem>> {
        let mut items: Vec<GroceryItem> = self
            .items
            .read()
            .await
            .values()
            .filter(|item| item.is_owned_by(owner_id))
            .cloned()
            .collect();

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn find(
        &self,
        item_id: &GroceryItemId,
        owner_id: &UserId,
    ) -> GroceryResult<Option<GroceryItem>> {
        Ok(self
            .items
            .read()
            .await
            .get(item_id)
            .filter(|item| item.is_owned_by(owner_id))
            .cloned())
    }

    async fn update(&self, item: &GroceryItem) -> GroceryResult<bool> {
        let mut items = self.items.write().await;
        match items.get_mut(&item.grocery_item_id) {
            Some(stored) if stored.is_owned_by(&item.owner_id) => {
                *stored = item.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, item_id: &GroceryItemId, owner_id: &UserId) -> GroceryResult<bool> {
        let mut items = self.items.write().await;
        if items.get(item_id).is_some_and(|item| item.is_owned_by(owner_id)) {
            items.remove(item_id);
            return Ok(true);
        }
        Ok(false)
    }
}
