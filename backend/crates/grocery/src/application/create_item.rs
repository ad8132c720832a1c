//! Create Item Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::input::CreateItemInput;
use crate::domain::entity::GroceryItem;
use crate::domain::repository::GroceryRepository;
use crate::error::GroceryResult;

pub struct CreateItemUseCase<G>
where
    G: GroceryRepository,
{
    repo: Arc<G>,
}

impl<G> CreateItemUseCase<G>
where
    G: GroceryRepository,
{
    pub fn new(repo: Arc<G>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        owner_id: UserId,
        input: CreateItemInput,
    ) -> GroceryResult<GroceryItem> {
        let item = GroceryItem::create(owner_id, input.validate()?);

        self.repo.insert(&item).await?;

        tracing::info!(
            user_id = %owner_id,
            item_id = %item.grocery_item_id,
            "Grocery item created"
        );

        Ok(item)
    }
}
