//! List Items Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::GroceryItem;
use crate::domain::repository::GroceryRepository;
use crate::error::GroceryResult;

pub struct ListItemsUseCase<G>
where
    G: GroceryRepository,
{
    repo: Arc<G>,
}

impl<G> ListItemsUseCase<G>
where
    G: GroceryRepository,
{
    pub fn new(repo: Arc<G>) -> Self {
        Self { repo }
    }

    /// All of the owner's items, newest first
    pub async fn execute(&self, owner_id: UserId) -> GroceryResult<Vec<GroceryItem>> {
        self.repo.list_by_owner(&owner_id).await
    }
}
