//! Delete Item Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::input::parse_item_id;
use crate::domain::repository::GroceryRepository;
use crate::error::{GroceryError, GroceryResult};

pub struct DeleteItemUseCase<G>
where
    G: GroceryRepository,
{
    repo: Arc<G>,
}

impl<G> DeleteItemUseCase<G>
where
    G: GroceryRepository,
{
    pub fn new(repo: Arc<G>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner_id: UserId, raw_id: &str) -> GroceryResult<()> {
        let item_id = parse_item_id(raw_id)?;

        if !self.repo.delete(&item_id, &owner_id).await? {
            return Err(GroceryError::NotFound);
        }

        tracing::info!(user_id = %owner_id, item_id = %item_id, "Grocery item deleted");

        Ok(())
    }
}
