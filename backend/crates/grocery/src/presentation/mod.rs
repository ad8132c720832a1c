//! Presentation Layer
//!
//! HTTP handlers, DTOs and the router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::GroceryAppState;
pub use router::{grocery_router, grocery_router_generic};
