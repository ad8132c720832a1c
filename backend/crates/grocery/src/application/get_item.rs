//! Get Item Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::input::parse_item_id;
use crate::domain::entity::GroceryItem;
use crate::domain::repository::GroceryRepository;
use crate::error::{GroceryError, GroceryResult};

pub struct GetItemUseCase<G>
where
    G: GroceryRepository,
{
    repo: Arc<G>,
}

impl<G> GetItemUseCase<G>
where
    G: GroceryRepository,
{
    pub fn new(repo: Arc<G>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner_id: UserId, raw_id: &str) -> GroceryResult<GroceryItem> {
        let item_id = parse_item_id(raw_id)?;

        self.repo
            .find(&item_id, &owner_id)
            .await?
            .ok_or(GroceryError::NotFound)
    }
}
