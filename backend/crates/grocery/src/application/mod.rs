//! Application Layer
//!
//! One use case per operation. All of them take the caller's user id and
//! never touch items owned by anyone else.

pub mod create_item;
pub mod delete_item;
pub mod get_item;
pub mod input;
pub mod list_items;
pub mod update_item;

pub use create_item::CreateItemUseCase;
pub use delete_item::DeleteItemUseCase;
pub use get_item::GetItemUseCase;
pub use input::{CreateItemInput, UpdateItemInput, parse_item_id};
pub use list_items::ListItemsUseCase;
pub use update_item::UpdateItemUseCase;
