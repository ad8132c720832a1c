//! Value Object Module

pub mod image_url;
pub mod price;
pub mod quantity;
pub mod text;

pub use image_url::ImageUrl;
pub use price::Price;
pub use quantity::Quantity;
pub use text::{Category, Description, ItemName};
