//! Repository Traits
//!
//! Every lookup takes the owner id; an item belonging to someone else is
//! indistinguishable from a missing one.

use kernel::id::{GroceryItemId, UserId};

use crate::domain::entity::GroceryItem;
use crate::error::GroceryResult;

#[trait_variant::make(GroceryRepository: Send)]
pub trait LocalGroceryRepository {
    async fn insert(&self, item: &GroceryItem) -> GroceryResult<()>;

    /// Newest first
    async fn list_by_owner(&self, owner_id: &UserId) -> GroceryResult<Vec<GroceryItem>>;

    async fn find(
        &self,
        item_id: &GroceryItemId,
        owner_id: &UserId,
    ) -> GroceryResult<Option<GroceryItem>>;

    /// Persist a modified item; `false` if no row matched id and owner
    async fn update(&self, item: &GroceryItem) -> GroceryResult<bool>;

    /// `false` if no row matched id and owner
    async fn delete(&self, item_id: &GroceryItemId, owner_id: &UserId) -> GroceryResult<bool>;
}
