//! Update Item Use Case
//!
//! Read-merge-write: the patch is validated before the item is looked up,
//! so a bad body is reported even for an unknown id.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::input::{UpdateItemInput, parse_item_id};
use crate::domain::entity::GroceryItem;
use crate::domain::repository::GroceryRepository;
use crate::error::{GroceryError, GroceryResult};

pub struct UpdateItemUseCase<G>
where
    G: GroceryRepository,
{
    repo: Arc<G>,
}

impl<G> UpdateItemUseCase<G>
where
    G: GroceryRepository,
{
    pub fn new(repo: Arc<G>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        owner_id: UserId,
        raw_id: &str,
        input: UpdateItemInput,
    ) -> GroceryResult<GroceryItem> {
        let item_id = parse_item_id(raw_id)?;
        let patch = input.validate()?;

        let mut item = self
            .repo
            .find(&item_id, &owner_id)
            .await?
            .ok_or(GroceryError::NotFound)?;

        item.apply(patch);

        // Deleted between read and write
        if !self.repo.update(&item).await? {
            return Err(GroceryError::NotFound);
        }

        tracing::debug!(user_id = %owner_id, item_id = %item_id, "Grocery item updated");

        Ok(item)
    }
}
