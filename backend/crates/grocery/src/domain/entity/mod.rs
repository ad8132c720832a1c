pub mod grocery_item;

pub use grocery_item::{GroceryItem, GroceryItemPatch, NewGroceryItem};
